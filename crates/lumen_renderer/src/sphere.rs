//! Sphere primitive.

use lumen_math::{Ray, Vec3};

use crate::{HitRecord, Hittable, Material};

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    /// Solve `|O + tD - center|^2 = r^2` for the nearest positive root.
    ///
    /// A ray whose origin lies inside the sphere hits the far surface from
    /// within; the reported normal then faces the origin (inward).
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Stable quadratic: never subtract two nearly-equal quantities.
        let sqrt_disc = discriminant.sqrt();
        let q = if b < 0.0 {
            -0.5 * (b - sqrt_disc)
        } else {
            -0.5 * (b + sqrt_disc)
        };

        let mut t0 = q / a;
        let mut t1 = if q != 0.0 { c / q } else { t0 };
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t1 <= 0.0 {
            // Sphere entirely behind the ray origin.
            return None;
        }

        if t0 <= 0.0 {
            // Origin inside the sphere: use the far root, normal inward.
            let outward = (ray.at(t1) - self.center).normalize();
            return Some(HitRecord::new(t1, -outward));
        }

        let outward = (ray.at(t0) - self.center).normalize();
        Some(HitRecord::new(t0, outward))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
