//! Lumen Core - scene data for the ray tracer.
//!
//! This crate provides:
//!
//! - **Mesh data**: `MeshData`, flat per-vertex arrays consumed in groups
//!   of three vertices per triangle
//! - **OBJ support**: loading triangulated Wavefront OBJ models
//! - **Scene descriptions**: serde types for the JSON scene file format
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::describe::SceneDescription;
//!
//! let description = SceneDescription::from_json_file("scene.json")?;
//! println!("Scene has {} objects and {} lights",
//!     description.objects.len(),
//!     description.lights.len());
//! ```

pub mod describe;
pub mod mesh;
pub mod obj;

// Re-export commonly used types
pub use describe::{
    LightDescription, MaterialDescription, ObjectDescription, SceneDescription, SceneError,
};
pub use mesh::MeshData;
pub use obj::{load_obj, ObjError};
