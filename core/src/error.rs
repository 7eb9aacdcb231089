//! Error types for mesh construction and plane configuration.

use std::fmt;

/// Errors that can occur while configuring or editing plane meshes.
///
/// Grid generation itself never fails; these errors come from validating
/// inputs up front (segment counts, config files) and from editing or
/// checking buffers after the fact.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The grid has more points than 16-bit indices can address.
    TooManyVertices {
        /// Requested grid points along X.
        segments_x: u32,
        /// Requested grid points along Y.
        segments_y: u32,
        /// Maximum number of addressable vertices.
        max: usize,
    },
    /// A vertex index is outside the vertex buffer.
    VertexOutOfRange {
        /// Requested vertex index.
        index: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// An entry of the index buffer references a missing vertex.
    IndexOutOfRange {
        /// Position in the index buffer.
        position: usize,
        /// The offending index value.
        index: u16,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// Vertex and UV buffers disagree in length.
    BufferLengthMismatch {
        /// Length of the vertex buffer (floats).
        vertices: usize,
        /// Length of the UV buffer (floats).
        uvs: usize,
    },
    /// The index buffer length is not a multiple of three.
    IndexCountNotTriangles(usize),
    /// A plane configuration could not be read or parsed.
    Config(String),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyVertices {
                segments_x,
                segments_y,
                max,
            } => write!(
                f,
                "grid of {segments_x}x{segments_y} points exceeds {max} addressable vertices"
            ),
            Self::VertexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "vertex {index} is out of range (vertex count: {vertex_count})"
            ),
            Self::IndexOutOfRange {
                position,
                index,
                vertex_count,
            } => write!(
                f,
                "index {index} at position {position} is out of range (vertex count: {vertex_count})"
            ),
            Self::BufferLengthMismatch { vertices, uvs } => write!(
                f,
                "vertex buffer has {vertices} floats but uv buffer has {uvs}"
            ),
            Self::IndexCountNotTriangles(count) => {
                write!(f, "index count {count} is not divisible by 3")
            }
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for MeshError {}
