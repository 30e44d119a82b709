//! Image assembly: primary-ray generation, supersampling and the pixel
//! buffer.
//!
//! The camera model is the scene's eye point looking at the image plane
//! `z = 0`, one world unit per pixel. Pixel (0, 0) is the top-left of the
//! image; the vertical axis flips when converting to world coordinates.

use std::path::Path;

use lumen_math::{Ray, Vec3};

use crate::{Color, Scene};

/// Render a single pixel with supersampling.
///
/// Generates `factor^2` primary rays on the regular sub-pixel grid with
/// offsets `(i + 1) / (factor + 1)`, traces each at the scene's recursion
/// depth, averages, and clamps the result to the displayable range. The
/// per-sample colors themselves stay unclamped until this point.
pub fn render_pixel(scene: &Scene, height: u32, x: u32, y: u32) -> Color {
    let factor = scene.supersampling_factor();
    let samples = factor * factor;

    let mut color = Vec3::ZERO;
    for n in 0..samples {
        let i = ((n % factor) + 1) as f32 / (factor + 1) as f32;
        let j = ((n / factor) + 1) as f32 / (factor + 1) as f32;

        let pixel = Vec3::new(
            x as f32 + i,
            (height - 1 - y) as f32 + j,
            0.0,
        );
        let ray = Ray::new(scene.eye(), (pixel - scene.eye()).normalize());

        color += scene.trace(&ray, scene.recursion_depth()) / samples as f32;
    }

    color.clamp(Vec3::ZERO, Vec3::ONE)
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b]
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }

    /// Write the buffer as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let mut img = image::RgbImage::new(self.width, self.height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Rgb(color_to_rgb8(self.get(x, y)));
        }
        img.save(path)
    }
}

/// Render the entire scene to an image buffer.
///
/// This is the simple single-threaded renderer; every cell is written
/// exactly once. See [`crate::render_parallel`] for the bucketed version.
pub fn render(scene: &Scene, width: u32, height: u32) -> ImageBuffer {
    let mut image = ImageBuffer::new(width, height);

    for y in 0..height {
        for x in 0..width {
            image.set(x, y, render_pixel(scene, height, x, y));
        }
    }

    image
}
