// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod ray;
pub use ray::Ray;
