//! Grid mesh generation for textured planes.
//!
//! A grid of `x` by `y` points is laid out row-major (x fastest) and
//! stretched over a texture. Each cell between four neighbouring points is
//! split into two triangles:
//!
//! ```text
//! v1 ---- v2
//!  |    / |
//!  |  /   |
//! v3 ---- v4      (v1, v2, v3), (v2, v4, v3)
//! ```
//!
//! The winding is fixed; renderers rely on it for face culling.

use serde::Deserialize;

use super::data::{BufferSource, IndexFormat, MeshBuffers, PrimitiveTopology};
use crate::error::MeshError;
use crate::texture::TextureRegion;

/// Grid points used along an axis when none are specified.
pub const DEFAULT_SEGMENTS: u32 = 10;

/// Number of grid points along each axis.
///
/// These are point counts, not cell counts: a 2x2 grid is a single quad.
/// A count of 1 is accepted and produces a degenerate grid with no
/// triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSegments {
    x: u32,
    y: u32,
}

impl Default for GridSegments {
    fn default() -> Self {
        Self {
            x: DEFAULT_SEGMENTS,
            y: DEFAULT_SEGMENTS,
        }
    }
}

impl GridSegments {
    /// Create a grid of `x` by `y` points.
    ///
    /// A count of 0 means "unspecified" and is replaced by
    /// [`DEFAULT_SEGMENTS`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::TooManyVertices`] if the grid has more points
    /// than 16-bit indices can address.
    pub fn new(x: u32, y: u32) -> Result<Self, MeshError> {
        let x = if x == 0 { DEFAULT_SEGMENTS } else { x };
        let y = if y == 0 { DEFAULT_SEGMENTS } else { y };

        let max = IndexFormat::Uint16.max_vertices();
        if x as u64 * y as u64 > max as u64 {
            return Err(MeshError::TooManyVertices {
                segments_x: x,
                segments_y: y,
                max,
            });
        }

        Ok(Self { x, y })
    }

    /// Grid points along X.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Grid points along Y.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Total number of grid points.
    pub fn point_count(&self) -> usize {
        self.x as usize * self.y as usize
    }

    /// Number of quads in the grid.
    pub fn cell_count(&self) -> usize {
        self.x.saturating_sub(1) as usize * self.y.saturating_sub(1) as usize
    }

    /// Number of indices the grid produces.
    pub fn index_count(&self) -> usize {
        self.cell_count() * 6
    }

    /// Check whether either axis has a single point.
    pub fn is_degenerate(&self) -> bool {
        self.x < 2 || self.y < 2
    }
}

/// Optional overrides applied during grid generation.
///
/// `mesh_width` and `mesh_height` replace the texture's pixel size when
/// scaling vertex positions. They never affect texture coordinates. A value
/// of `None` or `0.0` falls back to the texture size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub mesh_width: Option<f32>,
    #[serde(default)]
    pub mesh_height: Option<f32>,
}

impl GridConfig {
    /// Override the mesh size used for vertex positions.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.mesh_width = Some(width);
        self.mesh_height = Some(height);
        self
    }

    /// Width used for vertex scaling over `texture`.
    pub fn resolved_width(&self, texture: &TextureRegion) -> f32 {
        resolve(self.mesh_width, texture.width)
    }

    /// Height used for vertex scaling over `texture`.
    pub fn resolved_height(&self, texture: &TextureRegion) -> f32 {
        resolve(self.mesh_height, texture.height)
    }
}

fn resolve(value: Option<f32>, fallback: f32) -> f32 {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => fallback,
    }
}

/// `extent / cells`, or 0 when the axis has no cells.
#[inline]
fn step(extent: f32, cells: u32) -> f32 {
    if cells == 0 {
        0.0
    } else {
        extent / cells as f32
    }
}

/// Generate the buffers of a textured grid.
///
/// Vertex positions span `[0, width] x [0, height]` where the size comes from
/// `config` or the texture. Texture coordinates span `[0, 1]`, or the
/// texture's atlas frame when it has one. The colour buffer is left empty.
///
/// Always produces finite values: an axis with a single point has zero cell
/// size and zero UV step.
pub fn generate_grid(
    texture: &TextureRegion,
    segments: GridSegments,
    config: &GridConfig,
) -> MeshBuffers {
    crate::profile_function!();

    let seg_x = segments.x();
    let seg_y = segments.y();
    let sub_x = seg_x - 1;
    let sub_y = seg_y - 1;

    if segments.is_degenerate() {
        log::warn!(
            "Generating degenerate {}x{} grid: no triangles will be produced",
            seg_x,
            seg_y
        );
    }

    let size_x = step(config.resolved_width(texture), sub_x);
    let size_y = step(config.resolved_height(texture), sub_y);

    // Atlas frames interpolate across the packed slice only
    let atlas = texture.uv_frame.map(|frame| {
        (
            frame.x0,
            frame.y0,
            step(frame.x1 - frame.x0, sub_x),
            step(frame.y2 - frame.y0, sub_y),
        )
    });

    let mut buffers = MeshBuffers::with_capacity(segments.point_count(), segments.index_count());

    for i in 0..segments.point_count() as u32 {
        let x = (i % seg_x) as f32;
        let y = (i / seg_x) as f32;

        buffers.vertices.push(x * size_x);
        buffers.vertices.push(y * size_y);

        match atlas {
            Some((u0, v0, texel_x, texel_y)) => {
                buffers.uvs.push(u0 + texel_x * x);
                buffers.uvs.push(v0 + texel_y * y);
            }
            None => {
                buffers.uvs.push(step(x, sub_x));
                buffers.uvs.push(step(y, sub_y));
            }
        }
    }

    // Grid size is capped at 65536 points, so every index fits in u16
    for ypos in 0..sub_y {
        for xpos in 0..sub_x {
            let v1 = (ypos * seg_x + xpos) as u16;
            let v2 = v1 + 1;
            let v3 = v1 + seg_x as u16;
            let v4 = v3 + 1;

            buffers.indices.extend_from_slice(&[v1, v2, v3, v2, v4, v3]);
        }
    }

    log::trace!(
        "Generated {}x{} grid over {}x{} texture: {} vertices, {} indices",
        seg_x,
        seg_y,
        texture.width,
        texture.height,
        buffers.vertex_count(),
        buffers.index_count()
    );

    buffers
}

/// Builds grid buffers with fixed segments and overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridMeshGenerator {
    pub segments: GridSegments,
    pub config: GridConfig,
}

impl GridMeshGenerator {
    pub fn new(segments: GridSegments, config: GridConfig) -> Self {
        Self { segments, config }
    }

    /// Generate buffers for `texture`.
    pub fn generate(&self, texture: &TextureRegion) -> MeshBuffers {
        generate_grid(texture, self.segments, &self.config)
    }
}

impl BufferSource for GridMeshGenerator {
    fn topology(&self) -> PrimitiveTopology {
        PrimitiveTopology::TriangleList
    }

    fn build_buffers(&self, texture: &TextureRegion) -> MeshBuffers {
        self.generate(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::UvFrame;

    fn segments(x: u32, y: u32) -> GridSegments {
        GridSegments::new(x, y).unwrap()
    }

    #[test]
    fn test_segments_default_on_zero() {
        assert_eq!(segments(0, 0), GridSegments::default());
        assert_eq!(segments(0, 3).x(), DEFAULT_SEGMENTS);
        assert_eq!(segments(0, 3).y(), 3);
    }

    #[test]
    fn test_segments_vertex_limit() {
        assert!(GridSegments::new(256, 256).is_ok());
        assert_eq!(
            GridSegments::new(257, 256),
            Err(MeshError::TooManyVertices {
                segments_x: 257,
                segments_y: 256,
                max: 65536,
            })
        );
    }

    #[test]
    fn test_segments_counts() {
        let s = segments(4, 3);
        assert_eq!(s.point_count(), 12);
        assert_eq!(s.cell_count(), 6);
        assert_eq!(s.index_count(), 36);
        assert!(!s.is_degenerate());
        assert!(segments(1, 5).is_degenerate());
        assert_eq!(segments(1, 5).cell_count(), 0);
    }

    #[test]
    fn test_single_quad() {
        let texture = TextureRegion::new(100.0, 50.0);
        let mesh = generate_grid(&texture, segments(2, 2), &GridConfig::default());

        assert_eq!(mesh.vertices, vec![0.0, 0.0, 100.0, 0.0, 0.0, 50.0, 100.0, 50.0]);
        assert_eq!(mesh.uvs, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 3, 2]);
        assert!(mesh.colors.is_empty());
    }

    #[test]
    fn test_row_major_layout() {
        let texture = TextureRegion::new(30.0, 10.0);
        let mesh = generate_grid(&texture, segments(4, 2), &GridConfig::default());

        // Point 5 is (x=1, y=1)
        assert_eq!(mesh.vertex(5).unwrap().x, 10.0);
        assert_eq!(mesh.vertex(5).unwrap().y, 10.0);
        // Second quad of the first row
        assert_eq!(mesh.triangle(2), Some([1, 2, 5]));
        assert_eq!(mesh.triangle(3), Some([2, 6, 5]));
    }

    #[test]
    fn test_atlas_frame_uvs() {
        let texture = TextureRegion::new(64.0, 64.0)
            .with_uv_frame(UvFrame::from_bounds(0.25, 0.5, 0.75, 1.0));
        let mesh = generate_grid(&texture, segments(3, 3), &GridConfig::default());

        assert_eq!(mesh.uv(0).unwrap().x, 0.25);
        assert_eq!(mesh.uv(0).unwrap().y, 0.5);
        assert_eq!(mesh.uv(4).unwrap().x, 0.5);
        assert_eq!(mesh.uv(4).unwrap().y, 0.75);
        assert_eq!(mesh.uv(8).unwrap().x, 0.75);
        assert_eq!(mesh.uv(8).unwrap().y, 1.0);
    }

    #[test]
    fn test_overrides_scale_vertices_only() {
        let texture = TextureRegion::new(10.0, 10.0);
        let plain = generate_grid(&texture, segments(3, 3), &GridConfig::default());
        let scaled = generate_grid(
            &texture,
            segments(3, 3),
            &GridConfig::default().with_size(40.0, 20.0),
        );

        assert_eq!(plain.uvs, scaled.uvs);
        assert_eq!(scaled.vertex(8).unwrap().x, 40.0);
        assert_eq!(scaled.vertex(8).unwrap().y, 20.0);
        assert_eq!(plain.vertex(8).unwrap().x, 10.0);
    }

    #[test]
    fn test_zero_override_falls_back_to_texture() {
        let texture = TextureRegion::new(12.0, 6.0);
        let config = GridConfig {
            mesh_width: Some(0.0),
            mesh_height: None,
        };
        assert_eq!(config.resolved_width(&texture), 12.0);
        assert_eq!(config.resolved_height(&texture), 6.0);
    }

    #[test]
    fn test_degenerate_axis_is_finite() {
        let texture = TextureRegion::new(10.0, 10.0);
        let mesh = generate_grid(&texture, segments(1, 3), &GridConfig::default());

        assert_eq!(mesh.vertex_count(), 3);
        assert!(mesh.indices.is_empty());
        assert!(mesh.vertices.iter().all(|v| v.is_finite()));
        assert!(mesh.uvs.iter().all(|v| v.is_finite()));
        assert_eq!(mesh.vertices, vec![0.0, 0.0, 0.0, 5.0, 0.0, 10.0]);
        assert_eq!(mesh.uvs, vec![0.0, 0.0, 0.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_generator_as_buffer_source() {
        let generator = GridMeshGenerator::new(segments(5, 4), GridConfig::default());
        let texture = TextureRegion::new(8.0, 8.0);
        assert_eq!(generator.topology(), PrimitiveTopology::TriangleList);
        assert_eq!(generator.build_buffers(&texture), generator.generate(&texture));
        assert_eq!(generator.generate(&texture).index_count(), 4 * 3 * 6);
    }
}
