//! Building a renderable [`Scene`] from a scene description.
//!
//! The description layer (lumen_core) stays declarative; this module is
//! where primitives become intersectable shapes, mesh models are loaded
//! from disk and placement transforms are baked in.

use std::path::Path;

use lumen_core::describe::{MaterialDescription, ObjectDescription, SceneDescription};
use lumen_core::obj::{load_obj, ObjError};
use lumen_core::SceneError;
use lumen_math::Vec3;
use thiserror::Error;

use crate::{Light, Material, MeshTransform, Quad, Scene, Sphere, Triangle, TriangleMesh};

/// Errors that can occur while turning a description into a scene.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("model error: {0}")]
    Model(#[from] ObjError),
}

/// Load a scene file and build the renderable scene.
///
/// Mesh model paths are resolved relative to the scene file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, BuildError> {
    let description = SceneDescription::from_json_file(&path)?;
    let base_dir = path.as_ref().parent().unwrap_or_else(|| Path::new("."));
    build_scene(&description, base_dir)
}

/// Build a renderable scene from a validated description.
pub fn build_scene(description: &SceneDescription, base_dir: &Path) -> Result<Scene, BuildError> {
    let mut scene = Scene::new();
    scene.set_eye(Vec3::from(description.eye));
    scene.set_shadows(description.shadows);
    scene.set_recursion_depth(description.max_recursion_depth);
    scene.set_supersampling_factor(description.supersampling_factor);

    for light in &description.lights {
        scene.add_light(Light::new(
            Vec3::from(light.position),
            Vec3::from(light.color),
        ));
    }

    for object in &description.objects {
        match object {
            ObjectDescription::Sphere {
                position,
                radius,
                material,
            } => {
                scene.add_object(Box::new(Sphere::new(
                    Vec3::from(*position),
                    *radius,
                    material_from(material),
                )));
            }
            ObjectDescription::Triangle {
                v0,
                v1,
                v2,
                material,
            } => {
                scene.add_object(Box::new(Triangle::new(
                    Vec3::from(*v0),
                    Vec3::from(*v1),
                    Vec3::from(*v2),
                    material_from(material),
                )));
            }
            ObjectDescription::Quad {
                v0,
                v1,
                v2,
                v3,
                material,
            } => {
                scene.add_object(Box::new(Quad::new(
                    Vec3::from(*v0),
                    Vec3::from(*v1),
                    Vec3::from(*v2),
                    Vec3::from(*v3),
                    material_from(material),
                )));
            }
            ObjectDescription::Mesh {
                model,
                position,
                rotation,
                scale,
                material,
            } => {
                let data = load_obj(base_dir.join(model))?;
                let transform = MeshTransform {
                    scale: Vec3::from(*scale),
                    rotation: Vec3::from(*rotation),
                    position: Vec3::from(*position),
                };
                scene.add_object(Box::new(TriangleMesh::new(
                    &data,
                    &transform,
                    material_from(material),
                )));
            }
        }
    }

    log::debug!(
        "Built scene: {} objects, {} lights, depth {}, {}x supersampling",
        scene.object_count(),
        scene.light_count(),
        scene.recursion_depth(),
        scene.supersampling_factor()
    );

    Ok(scene)
}

fn material_from(description: &MaterialDescription) -> Material {
    Material {
        color: Vec3::from(description.color),
        ka: description.ka,
        kd: description.kd,
        ks: description.ks,
        n: description.n,
        is_transparent: description.is_transparent,
        nt: description.nt,
    }
}
