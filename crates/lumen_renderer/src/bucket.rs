//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. The scene is read-only during rendering
//! and every bucket owns a disjoint set of output pixels, so no
//! coordination is needed beyond collecting the results.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use lumen_math::Vec3;

use crate::renderer::render_pixel;
use crate::{Color, ImageBuffer, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate the row-major grid of buckets covering an image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixels in row-major order within the bucket
    pub pixels: Vec<Color>,
}

/// Render a single bucket.
///
/// The cancel flag is checked once per scanline; after cancellation the
/// remaining pixels of the bucket stay at the background color.
pub fn render_bucket(
    scene: &Scene,
    image_height: u32,
    bucket: &Bucket,
    cancel: &AtomicBool,
) -> BucketResult {
    let mut pixels = vec![Vec3::ZERO; bucket.pixel_count() as usize];

    'rows: for local_y in 0..bucket.height {
        if cancel.load(Ordering::Relaxed) {
            break 'rows;
        }
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            let color = render_pixel(scene, image_height, global_x, global_y);
            pixels[(local_y * bucket.width + local_x) as usize] = color;
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
    }
}

/// Render the scene in parallel, bucket by bucket.
///
/// Produces the same image as [`crate::render`]; setting `cancel` aborts
/// outstanding work and returns the partially filled buffer, remaining
/// pixels left at the background color.
pub fn render_parallel(
    scene: &Scene,
    width: u32,
    height: u32,
    cancel: &AtomicBool,
) -> ImageBuffer {
    let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);
    log::debug!("Rendering {}x{} in {} buckets", width, height, buckets.len());

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(scene, height, bucket, cancel))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in results {
        let bucket = result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    image
}
