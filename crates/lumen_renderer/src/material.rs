//! Phong material description.

use lumen_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Surface reflectance in the empirical Phong model.
///
/// All coefficients are non-negative; scene construction validates this,
/// the renderer does not re-check. `nt` is only meaningful when
/// `is_transparent` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base surface color
    pub color: Color,
    /// Ambient coefficient
    pub ka: f32,
    /// Diffuse coefficient
    pub kd: f32,
    /// Specular coefficient
    pub ks: f32,
    /// Phong exponent
    pub n: f32,
    /// Whether refraction rays are spawned for this surface
    pub is_transparent: bool,
    /// Refractive index of the material interior
    pub nt: f32,
}

impl Material {
    /// A matte surface: no specular highlight, no secondary rays.
    pub fn diffuse(color: Color, ka: f32, kd: f32) -> Self {
        Self {
            color,
            ka,
            kd,
            ks: 0.0,
            n: 1.0,
            is_transparent: false,
            nt: 1.0,
        }
    }

    /// An opaque shiny surface; `ks > 0` also enables reflection rays.
    pub fn specular(color: Color, ka: f32, kd: f32, ks: f32, n: f32) -> Self {
        Self {
            color,
            ka,
            kd,
            ks,
            n,
            is_transparent: false,
            nt: 1.0,
        }
    }

    /// A transparent surface with refractive index `nt` (1.0 = air,
    /// 1.5 = glass); spawns both reflection and refraction rays.
    pub fn transparent(color: Color, ks: f32, n: f32, nt: f32) -> Self {
        Self {
            color,
            ka: 0.0,
            kd: 0.0,
            ks,
            n,
            is_transparent: true,
            nt,
        }
    }
}
