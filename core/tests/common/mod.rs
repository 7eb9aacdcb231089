//! Shared helpers for plane integration tests.

#![allow(dead_code)]

use planegrid_core::mesh::{GridConfig, GridSegments, MeshBuffers, generate_grid};
use planegrid_core::texture::TextureRegion;

/// Tolerance for uv comparisons involving atlas subtraction.
pub const EPSILON: f32 = 1e-6;

/// Initialize logging for test output.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Build validated segments.
pub fn segments(x: u32, y: u32) -> GridSegments {
    GridSegments::new(x, y).expect("test grid fits in 16-bit indices")
}

/// Generate a grid without size overrides.
pub fn grid(texture: &TextureRegion, x: u32, y: u32) -> MeshBuffers {
    generate_grid(texture, segments(x, y), &GridConfig::default())
}

/// Assert two floats are equal within [`EPSILON`].
pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {expected}, got {actual}"
    );
}
