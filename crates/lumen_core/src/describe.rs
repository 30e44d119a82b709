//! Scene description file format.
//!
//! A scene is described declaratively in JSON: the camera eye, render
//! settings, an ordered list of lights and an ordered list of objects.
//! Order matters: the renderer resolves intersection ties in favor of the
//! object listed first.
//!
//! Validation happens here, at construction time. The rendering core
//! assumes a validated scene and never re-checks per ray.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scene: {0}")]
    Validation(String),
}

/// A complete scene description as read from a scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    /// Camera eye position
    pub eye: [f32; 3],

    /// Whether shadow rays are cast
    #[serde(default)]
    pub shadows: bool,

    /// Remaining reflection/refraction bounces for primary rays
    #[serde(default)]
    pub max_recursion_depth: u32,

    /// Sub-pixel grid resolution per axis (1 = one sample per pixel)
    #[serde(default = "default_supersampling")]
    pub supersampling_factor: u32,

    /// Point lights, in order
    #[serde(default)]
    pub lights: Vec<LightDescription>,

    /// Objects, in order
    pub objects: Vec<ObjectDescription>,
}

fn default_supersampling() -> u32 {
    1
}

/// A point light: position plus color/intensity.
#[derive(Debug, Clone, Deserialize)]
pub struct LightDescription {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// One primitive in the scene, tagged by type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDescription {
    Sphere {
        position: [f32; 3],
        radius: f32,
        material: MaterialDescription,
    },
    Triangle {
        v0: [f32; 3],
        v1: [f32; 3],
        v2: [f32; 3],
        material: MaterialDescription,
    },
    Quad {
        v0: [f32; 3],
        v1: [f32; 3],
        v2: [f32; 3],
        v3: [f32; 3],
        material: MaterialDescription,
    },
    Mesh {
        /// Path to the OBJ model, relative to the scene file
        model: String,
        #[serde(default)]
        position: [f32; 3],
        /// Rotation about X, then Y, then Z, in radians
        #[serde(default)]
        rotation: [f32; 3],
        #[serde(default = "default_scale")]
        scale: [f32; 3],
        material: MaterialDescription,
    },
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl ObjectDescription {
    /// The material attached to this primitive.
    pub fn material(&self) -> &MaterialDescription {
        match self {
            ObjectDescription::Sphere { material, .. } => material,
            ObjectDescription::Triangle { material, .. } => material,
            ObjectDescription::Quad { material, .. } => material,
            ObjectDescription::Mesh { material, .. } => material,
        }
    }
}

/// Phong reflectance description of one surface.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialDescription {
    pub color: [f32; 3],
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    /// Phong exponent
    pub n: f32,
    #[serde(default)]
    pub is_transparent: bool,
    /// Refractive index, used only when `is_transparent` is set
    #[serde(default = "default_nt")]
    pub nt: f32,
}

fn default_nt() -> f32 {
    1.0
}

impl SceneDescription {
    /// Read, parse and validate a scene description from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let text = fs::read_to_string(&path)?;
        let description: SceneDescription = serde_json::from_str(&text)?;
        description.validate()?;

        log::info!(
            "Loaded scene {} with {} objects and {} lights",
            path.as_ref().display(),
            description.objects.len(),
            description.lights.len()
        );

        Ok(description)
    }

    /// Check the invariants the rendering core relies on.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.supersampling_factor == 0 {
            return Err(SceneError::Validation(
                "supersampling_factor must be at least 1".into(),
            ));
        }

        for (index, object) in self.objects.iter().enumerate() {
            let material = object.material();

            if material.ka < 0.0 || material.kd < 0.0 || material.ks < 0.0 || material.n < 0.0 {
                return Err(SceneError::Validation(format!(
                    "object {index}: material coefficients must be non-negative"
                )));
            }
            if material.is_transparent && material.nt < 1.0 {
                return Err(SceneError::Validation(format!(
                    "object {index}: refractive index must be at least 1"
                )));
            }
            if let ObjectDescription::Sphere { radius, .. } = object {
                if *radius <= 0.0 {
                    return Err(SceneError::Validation(format!(
                        "object {index}: sphere radius must be positive"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_json(material: &str) -> String {
        format!(
            r#"{{
                "eye": [0, 0, 10],
                "objects": [
                    {{ "type": "sphere", "position": [0, 0, 0], "radius": 2,
                       "material": {material} }}
                ]
            }}"#
        )
    }

    #[test]
    fn test_defaults() {
        let json = sphere_json(r#"{ "color": [1, 0, 0], "ka": 0.2, "kd": 0.8, "ks": 0.0, "n": 1 }"#);
        let description: SceneDescription = serde_json::from_str(&json).unwrap();
        description.validate().unwrap();

        assert!(!description.shadows);
        assert_eq!(description.max_recursion_depth, 0);
        assert_eq!(description.supersampling_factor, 1);
        assert!(description.lights.is_empty());

        let material = description.objects[0].material();
        assert!(!material.is_transparent);
        assert_eq!(material.nt, 1.0);
    }

    #[test]
    fn test_unknown_primitive_type_is_an_error() {
        let json = r#"{
            "eye": [0, 0, 10],
            "objects": [ { "type": "torus", "material": {} } ]
        }"#;
        assert!(serde_json::from_str::<SceneDescription>(json).is_err());
    }

    #[test]
    fn test_negative_coefficient_rejected() {
        let json = sphere_json(r#"{ "color": [1, 0, 0], "ka": -0.2, "kd": 0.8, "ks": 0.0, "n": 1 }"#);
        let description: SceneDescription = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            description.validate(),
            Err(SceneError::Validation(_))
        ));
    }

    #[test]
    fn test_transparent_material_needs_valid_index() {
        let json = sphere_json(
            r#"{ "color": [1, 1, 1], "ka": 0, "kd": 0, "ks": 0.5, "n": 8,
                 "is_transparent": true, "nt": 0.5 }"#,
        );
        let description: SceneDescription = serde_json::from_str(&json).unwrap();
        assert!(description.validate().is_err());
    }

    #[test]
    fn test_zero_supersampling_rejected() {
        let json = r#"{
            "eye": [0, 0, 10],
            "supersampling_factor": 0,
            "objects": []
        }"#;
        let description: SceneDescription = serde_json::from_str(json).unwrap();
        assert!(description.validate().is_err());
    }

    #[test]
    fn test_mesh_defaults() {
        let json = r#"{
            "eye": [0, 0, 10],
            "objects": [
                { "type": "mesh", "model": "cube.obj",
                  "material": { "color": [1, 1, 1], "ka": 0.1, "kd": 0.9,
                                "ks": 0.0, "n": 1 } }
            ]
        }"#;
        let description: SceneDescription = serde_json::from_str(json).unwrap();

        match &description.objects[0] {
            ObjectDescription::Mesh {
                position,
                rotation,
                scale,
                ..
            } => {
                assert_eq!(*position, [0.0, 0.0, 0.0]);
                assert_eq!(*rotation, [0.0, 0.0, 0.0]);
                assert_eq!(*scale, [1.0, 1.0, 1.0]);
            }
            other => panic!("expected mesh, got {other:?}"),
        }
    }
}
