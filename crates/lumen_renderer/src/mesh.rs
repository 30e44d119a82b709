//! Triangle mesh primitive.
//!
//! A mesh is flattened into plain [`Triangle`]s once at build time, with
//! its placement transform baked into the vertices. Intersection is a
//! linear scan over the triangles for the globally nearest hit, the same
//! policy as the scene-level search scoped to this mesh.

use lumen_core::MeshData;
use lumen_math::{Mat3, Ray, Vec3};

use crate::{HitRecord, Hittable, Material, Triangle};

/// Placement of a mesh in the scene.
///
/// Applied to every vertex in strict order: non-uniform per-axis scale,
/// rotation about X, then Y, then Z, then translation.
#[derive(Debug, Clone, Copy)]
pub struct MeshTransform {
    pub scale: Vec3,
    /// Rotation about X, Y, Z in radians
    pub rotation: Vec3,
    pub position: Vec3,
}

impl MeshTransform {
    /// Apply the transform to a single vertex.
    pub fn apply(&self, vertex: Vec3) -> Vec3 {
        self.rotation_matrix() * (vertex * self.scale) + self.position
    }

    fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_rotation_z(self.rotation.z)
            * Mat3::from_rotation_y(self.rotation.y)
            * Mat3::from_rotation_x(self.rotation.x)
    }
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            position: Vec3::ZERO,
        }
    }
}

/// A mesh primitive: a transformed collection of triangles.
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    material: Material,
}

impl TriangleMesh {
    /// Build a mesh shape from loaded vertex data and a placement.
    pub fn new(data: &MeshData, transform: &MeshTransform, material: Material) -> Self {
        let mut triangles = Vec::with_capacity(data.triangle_count());

        for index in 0..data.triangle_count() {
            let [v0, v1, v2] = data.triangle(index);
            triangles.push(Triangle::new(
                transform.apply(v0),
                transform.apply(v1),
                transform.apply(v2),
                material.clone(),
            ));
        }

        Self {
            triangles,
            material,
        }
    }

    /// Number of triangles in this mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl Hittable for TriangleMesh {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let mut nearest: Option<HitRecord> = None;

        for triangle in &self.triangles {
            if let Some(rec) = triangle.intersect(ray) {
                if nearest.map_or(true, |near| rec.t < near.t) {
                    nearest = Some(rec);
                }
            }
        }

        nearest
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
