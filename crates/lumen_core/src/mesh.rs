//! Mesh vertex data for the lumen scene pipeline.
//!
//! This module provides a renderer-agnostic vertex container populated by
//! model loaders (see [`crate::obj`]). Vertices are stored as flat arrays
//! and consumed as consecutive groups of three per triangle.

use lumen_math::Vec3;

/// Triangulated mesh data: per-vertex position, normal and UV arrays.
///
/// The three arrays always have the same length, which is a multiple of
/// three; vertices `3k`, `3k + 1` and `3k + 2` form triangle `k`. Loaders
/// that encounter models without normals or texture coordinates fill in
/// computed face normals and zero UVs, so consumers never deal with
/// missing attributes.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (same length as `positions`)
    pub normals: Vec<Vec3>,

    /// UV coordinates (one [u, v] per vertex)
    pub uvs: Vec<[f32; 2]>,
}

impl MeshData {
    /// Create empty mesh data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one vertex.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
    }

    /// Number of triangles described by the vertex arrays.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// The three corner positions of triangle `index`.
    pub fn triangle(&self, index: usize) -> [Vec3; 3] {
        [
            self.positions[index * 3],
            self.positions[index * 3 + 1],
            self.positions[index * 3 + 2],
        ]
    }

    /// True if the mesh holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = MeshData::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_triangle_access() {
        let mut mesh = MeshData::new();
        let n = Vec3::Z;
        mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0), n, [0.0, 0.0]);
        mesh.push_vertex(Vec3::new(1.0, 0.0, 0.0), n, [1.0, 0.0]);
        mesh.push_vertex(Vec3::new(0.0, 1.0, 0.0), n, [0.0, 1.0]);

        assert_eq!(mesh.triangle_count(), 1);
        let [v0, v1, v2] = mesh.triangle(0);
        assert_eq!(v0, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(v1, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(v2, Vec3::new(0.0, 1.0, 0.0));
    }
}
