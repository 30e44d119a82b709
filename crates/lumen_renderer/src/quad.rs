//! Quad primitive, composed of two triangles.

use lumen_math::{Ray, Vec3};

use crate::{HitRecord, Hittable, Material, Triangle};

/// A quadrilateral split along the `v0..v2` diagonal into two triangles.
///
/// Intersection tries the first triangle and only falls back to the second
/// on a miss. For a convex planar quad this equals the nearest hit; for a
/// degenerate or non-planar quad the first triangle wins even when the
/// second is closer. That first-found policy is intentional and kept.
pub struct Quad {
    first: Triangle,
    second: Triangle,
    material: Material,
}

impl Quad {
    /// Create a new quad from four vertices in perimeter order.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, v3: Vec3, material: Material) -> Self {
        Self {
            first: Triangle::new(v0, v1, v2, material.clone()),
            second: Triangle::new(v0, v2, v3, material.clone()),
            material,
        }
    }
}

impl Hittable for Quad {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        self.first
            .intersect(ray)
            .or_else(|| self.second.intersect(ray))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
