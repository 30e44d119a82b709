//! Triangle primitive.
//!
//! Intersection is the ray/plane hit followed by an area-containment test:
//! the point lies inside iff the three sub-triangle areas it forms with the
//! edges sum to the triangle's own area.

use lumen_math::{Ray, Vec3};

use crate::{HitRecord, Hittable, Material};

/// Ray directions closer to perpendicular with the plane normal than this
/// count as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Relative tolerance for the area-containment comparison.
const AREA_EPSILON: f32 = 1e-4;

/// A triangle primitive.
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed unit normal from the stored winding
    normal: Vec3,
    /// Pre-computed surface area
    area: f32,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The vertices must not be collinear; degenerate triangles are a
    /// construction-time precondition violation.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let cross = (v1 - v0).cross(v2 - v0);
        Self {
            v0,
            v1,
            v2,
            normal: cross.normalize(),
            area: 0.5 * cross.length(),
            material,
        }
    }
}

/// Area of the triangle spanned by three points.
fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    0.5 * (b - a).cross(c - a).length()
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            // Ray parallel to the triangle plane.
            return None;
        }

        let t = self.normal.dot(self.v0 - ray.origin) / denom;
        if t <= 0.0 {
            return None;
        }

        let p = ray.at(t);
        let sum = triangle_area(p, self.v1, self.v2)
            + triangle_area(self.v0, p, self.v2)
            + triangle_area(self.v0, self.v1, p);
        if (sum - self.area).abs() > AREA_EPSILON * self.area.max(1.0) {
            // Plane hit lies outside the triangle.
            return None;
        }

        // The returned normal always opposes the incoming ray, regardless
        // of the stored winding.
        let normal = if denom < 0.0 { self.normal } else { -self.normal };
        Some(HitRecord::new(t, normal))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
