//! # planegrid core
//!
//! Textured grid planes for 2D rendering: a texture stretched across a
//! configurable grid of points, producing vertex, uv, colour and 16-bit
//! index buffers ready for GPU upload.

pub mod config;
pub mod error;
pub mod math;
pub mod mesh;
pub mod plane;
pub mod profiling;
pub mod texture;

pub use error::MeshError;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version and start profiling if enabled.
pub fn init() {
    profiling::init_profiling();
    log::info!("planegrid core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
