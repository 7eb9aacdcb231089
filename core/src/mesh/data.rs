//! CPU-side mesh data structures.
//!
//! This module provides:
//! - [`PrimitiveTopology`] - How vertices are assembled into primitives
//! - [`IndexFormat`] - Index data format
//! - [`MeshBuffers`] - The four parallel buffers of a 2D textured mesh
//! - [`PlaneVertex`] - Interleaved position + uv record for single-buffer upload
//! - [`BufferSource`] - Anything that can build [`MeshBuffers`] for a texture
//! - [`Mesh`] - A drawable mesh owning its buffers and upload revision

use crate::error::MeshError;
use crate::math::Vec2;
use crate::texture::TextureRegion;

/// Primitive topology describing how vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Every three indices form a triangle.
    #[default]
    TriangleList,
}

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65536 vertices).
    #[default]
    Uint16,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
        }
    }

    /// Maximum number of vertices addressable with this format.
    pub fn max_vertices(&self) -> usize {
        match self {
            Self::Uint16 => u16::MAX as usize + 1,
        }
    }
}

/// Interleaved vertex record (16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// The four parallel buffers of a 2D textured mesh.
///
/// - `vertices`: flat `[x0, y0, x1, y1, ...]` positions
/// - `uvs`: flat texture coordinates, same indexing as `vertices`
/// - `colors`: reserved for per-vertex tint, left empty by grid generation
/// - `indices`: triangle indices, three per triangle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshBuffers {
    pub vertices: Vec<f32>,
    pub uvs: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u16>,
}

impl MeshBuffers {
    /// Create empty buffers with room for `vertex_count` points and `index_count` indices.
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count * 2),
            uvs: Vec::with_capacity(vertex_count * 2),
            colors: Vec::new(),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Number of indices.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index format of the index buffer.
    pub fn index_format(&self) -> IndexFormat {
        IndexFormat::Uint16
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: usize) -> Option<Vec2> {
        let x = *self.vertices.get(i * 2)?;
        let y = *self.vertices.get(i * 2 + 1)?;
        Some(Vec2::new(x, y))
    }

    /// Texture coordinate of vertex `i`.
    pub fn uv(&self, i: usize) -> Option<Vec2> {
        let u = *self.uvs.get(i * 2)?;
        let v = *self.uvs.get(i * 2 + 1)?;
        Some(Vec2::new(u, v))
    }

    /// The three vertex indices of triangle `t`.
    pub fn triangle(&self, t: usize) -> Option<[u16; 3]> {
        let base = t * 3;
        match self.indices.get(base..base + 3) {
            Some(&[a, b, c]) => Some([a, b, c]),
            _ => None,
        }
    }

    /// Vertex positions as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Texture coordinates as raw bytes.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Indices as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Interleave positions and uvs into one record per vertex.
    pub fn interleaved(&self) -> Vec<PlaneVertex> {
        self.vertices
            .chunks_exact(2)
            .zip(self.uvs.chunks_exact(2))
            .map(|(p, uv)| PlaneVertex {
                position: [p[0], p[1]],
                uv: [uv[0], uv[1]],
            })
            .collect()
    }

    /// Validates buffer integrity.
    ///
    /// Checks:
    /// - Vertex and UV buffers have the same length
    /// - The index count is a multiple of three
    /// - Every index references an existing vertex
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.vertices.len() != self.uvs.len() {
            return Err(MeshError::BufferLengthMismatch {
                vertices: self.vertices.len(),
                uvs: self.uvs.len(),
            });
        }

        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles(self.indices.len()));
        }

        let vertex_count = self.vertex_count();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &idx)| idx as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }

        Ok(())
    }
}

/// Something that can produce mesh buffers for a texture.
pub trait BufferSource {
    /// Topology of the produced index buffer.
    fn topology(&self) -> PrimitiveTopology;

    /// Build a fresh set of buffers for `texture`.
    fn build_buffers(&self, texture: &TextureRegion) -> MeshBuffers;
}

/// A drawable mesh: buffers, topology and an upload revision.
///
/// The revision increases every time the buffers are replaced or edited,
/// so a renderer can compare it against the revision it last uploaded.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    buffers: MeshBuffers,
    topology: PrimitiveTopology,
    revision: u64,
    label: Option<String>,
}

impl Mesh {
    /// Create an empty mesh with the given topology.
    pub fn new(topology: PrimitiveTopology) -> Self {
        Self {
            topology,
            ..Self::default()
        }
    }

    /// Create a mesh with buffers built by `source`.
    pub fn from_source(source: &dyn BufferSource, texture: &TextureRegion) -> Self {
        let mut mesh = Self::new(source.topology());
        mesh.rebuild(source, texture);
        mesh
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replace the buffers wholesale with the output of `source`.
    pub fn rebuild(&mut self, source: &dyn BufferSource, texture: &TextureRegion) {
        self.topology = source.topology();
        self.replace_buffers(source.build_buffers(texture));
    }

    /// Replace the buffers.
    pub fn replace_buffers(&mut self, buffers: MeshBuffers) {
        self.buffers = buffers;
        self.revision += 1;
    }

    /// Move vertex `index` to `position`.
    pub fn set_vertex(&mut self, index: usize, position: Vec2) -> Result<(), MeshError> {
        let vertex_count = self.buffers.vertex_count();
        if index >= vertex_count {
            return Err(MeshError::VertexOutOfRange {
                index,
                vertex_count,
            });
        }
        self.buffers.vertices[index * 2] = position.x;
        self.buffers.vertices[index * 2 + 1] = position.y;
        self.revision += 1;
        Ok(())
    }

    /// Get the buffers.
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    /// Get the primitive topology.
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Get the upload revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_buffers() -> MeshBuffers {
        MeshBuffers {
            vertices: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            colors: Vec::new(),
            indices: vec![0, 1, 2, 1, 3, 2],
        }
    }

    struct FixedSource;

    impl BufferSource for FixedSource {
        fn topology(&self) -> PrimitiveTopology {
            PrimitiveTopology::TriangleList
        }

        fn build_buffers(&self, _texture: &TextureRegion) -> MeshBuffers {
            quad_buffers()
        }
    }

    #[test]
    fn test_index_format() {
        assert_eq!(IndexFormat::Uint16.size(), 2);
        assert_eq!(IndexFormat::Uint16.max_vertices(), 65536);
    }

    #[test]
    fn test_buffer_accessors() {
        let buffers = quad_buffers();
        assert_eq!(buffers.vertex_count(), 4);
        assert_eq!(buffers.index_count(), 6);
        assert_eq!(buffers.triangle_count(), 2);
        assert_eq!(buffers.vertex(3), Some(Vec2::new(1.0, 1.0)));
        assert_eq!(buffers.uv(1), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(buffers.vertex(4), None);
        assert_eq!(buffers.triangle(1), Some([1, 3, 2]));
        assert_eq!(buffers.triangle(2), None);
        assert!(buffers.validate().is_ok());
    }

    #[test]
    fn test_byte_views() {
        let buffers = quad_buffers();
        assert_eq!(buffers.vertex_bytes().len(), 8 * 4);
        assert_eq!(buffers.uv_bytes().len(), 8 * 4);
        assert_eq!(buffers.index_bytes().len(), 6 * 2);
        assert_eq!(buffers.index_format(), IndexFormat::Uint16);
    }

    #[test]
    fn test_interleaved() {
        let vertices = quad_buffers().interleaved();
        assert_eq!(vertices.len(), 4);
        assert_eq!(std::mem::size_of::<PlaneVertex>(), 16);
        assert_eq!(
            vertices[1],
            PlaneVertex {
                position: [1.0, 0.0],
                uv: [1.0, 0.0],
            }
        );
    }

    #[test]
    fn test_validate_errors() {
        let mut buffers = quad_buffers();
        buffers.indices[4] = 9;
        assert_eq!(
            buffers.validate(),
            Err(MeshError::IndexOutOfRange {
                position: 4,
                index: 9,
                vertex_count: 4,
            })
        );

        let mut buffers = quad_buffers();
        buffers.indices.pop();
        assert_eq!(
            buffers.validate(),
            Err(MeshError::IndexCountNotTriangles(5))
        );

        let mut buffers = quad_buffers();
        buffers.uvs.truncate(6);
        assert_eq!(
            buffers.validate(),
            Err(MeshError::BufferLengthMismatch {
                vertices: 8,
                uvs: 6,
            })
        );
    }

    #[test]
    fn test_mesh_rebuild_bumps_revision() {
        let texture = TextureRegion::new(1.0, 1.0);
        let mut mesh = Mesh::from_source(&FixedSource, &texture).with_label("quad");
        assert_eq!(mesh.revision(), 1);
        assert_eq!(mesh.label(), Some("quad"));
        assert_eq!(mesh.topology(), PrimitiveTopology::TriangleList);

        mesh.rebuild(&FixedSource, &texture);
        assert_eq!(mesh.revision(), 2);
        assert_eq!(mesh.buffers(), &quad_buffers());
    }

    #[test]
    fn test_mesh_set_vertex() {
        let mut mesh = Mesh::from_source(&FixedSource, &TextureRegion::new(1.0, 1.0));
        mesh.set_vertex(2, Vec2::new(-0.5, 2.0)).unwrap();
        assert_eq!(mesh.buffers().vertex(2), Some(Vec2::new(-0.5, 2.0)));
        assert_eq!(mesh.buffers().uv(2), Some(Vec2::new(0.0, 1.0)));
        assert_eq!(mesh.revision(), 2);

        assert_eq!(
            mesh.set_vertex(4, Vec2::zeros()),
            Err(MeshError::VertexOutOfRange {
                index: 4,
                vertex_count: 4,
            })
        );
        assert_eq!(mesh.revision(), 2);
    }
}
