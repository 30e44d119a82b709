//! Point light description.

use lumen_math::Vec3;

use crate::Color;

/// A point light: a position plus a color/intensity.
///
/// Lights are owned by the scene and never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}
