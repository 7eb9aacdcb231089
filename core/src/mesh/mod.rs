//! CPU-side mesh types and the grid generator.
//!
//! - [`MeshBuffers`] - Vertex, uv, colour and index buffers
//! - [`Mesh`] - Buffers plus topology and upload revision
//! - [`BufferSource`] - Builds buffers for a texture
//! - [`GridMeshGenerator`] / [`generate_grid`] - Textured grid generation

mod data;
pub mod grid;

pub use data::{BufferSource, IndexFormat, Mesh, MeshBuffers, PlaneVertex, PrimitiveTopology};
pub use grid::{DEFAULT_SEGMENTS, GridConfig, GridMeshGenerator, GridSegments, generate_grid};
