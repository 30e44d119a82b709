//! Hittable trait and HitRecord for ray-object intersection.

use lumen_math::{Ray, Vec3};

use crate::Material;

/// Record of a ray-object intersection.
///
/// `t` is the parametric distance along the ray, always finite and
/// positive; misses are represented by `Option::None` rather than a
/// sentinel record. For closed solids the normal points outward, except
/// where a primitive's contract says otherwise (a sphere hit from the
/// inside reports the inward normal, a triangle always reports the normal
/// opposing the ray).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Surface normal at the intersection point
    pub normal: Vec3,
}

impl HitRecord {
    /// Create a new hit record.
    pub fn new(t: f32, normal: Vec3) -> Self {
        Self { t, normal }
    }
}

/// Trait for objects that can be hit by rays.
///
/// `intersect` is a pure function of the ray and the primitive's immutable
/// state: it returns `None` when there is no intersection at positive `t`,
/// and the *nearest* valid intersection otherwise. A primitive never
/// reports more than one hit.
pub trait Hittable: Send + Sync {
    /// Test this object against a ray.
    fn intersect(&self, ray: &Ray) -> Option<HitRecord>;

    /// The material of this object.
    fn material(&self) -> &Material;
}
