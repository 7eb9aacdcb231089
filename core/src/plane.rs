//! Textured grid planes.
//!
//! A [`Plane`] stretches a [`Texture`] over a grid of points so the points
//! can be moved independently (banners, cloth, warps). Its buffers are
//! regenerated whenever the texture changes.
//!
//! # Example
//!
//! ```
//! use planegrid_core::mesh::{GridConfig, GridSegments};
//! use planegrid_core::plane::Plane;
//! use planegrid_core::texture::{Texture, TextureRegion};
//!
//! let texture = Texture::new(TextureRegion::new(256.0, 64.0));
//! let plane = Plane::new(
//!     texture.clone(),
//!     GridSegments::new(17, 2).unwrap(),
//!     GridConfig::default(),
//! );
//! assert_eq!(plane.buffers().vertex_count(), 34);
//!
//! // Texture swaps regenerate the mesh
//! texture.update(TextureRegion::new(512.0, 64.0));
//! assert_eq!(plane.buffers().vertex(16).unwrap().x, 512.0);
//! ```

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::config::PlaneConfig;
use crate::error::MeshError;
use crate::math::Vec2;
use crate::mesh::{GridConfig, GridMeshGenerator, GridSegments, Mesh, MeshBuffers};
use crate::texture::{Texture, TextureListener};

struct PlaneState {
    texture: Texture,
    generator: GridMeshGenerator,
    mesh: Mesh,
}

impl PlaneState {
    fn refresh(&mut self) {
        let region = self.texture.region();
        self.mesh.rebuild(&self.generator, &region);
    }
}

/// A grid mesh bound to a texture.
///
/// Planes are shared (`Arc<Plane>`) because their texture holds a weak
/// subscription to them.
pub struct Plane {
    self_ref: Weak<Plane>,
    state: RwLock<PlaneState>,
}

impl Plane {
    /// Create a plane over `texture`.
    ///
    /// The mesh is generated before the plane subscribes to texture changes,
    /// so no notification can observe a half-built plane. An update that lands
    /// between generation and subscription is caught by re-checking the region
    /// once subscribed.
    pub fn new(texture: Texture, segments: GridSegments, config: GridConfig) -> Arc<Self> {
        let generator = GridMeshGenerator::new(segments, config);
        let built_from = texture.region();
        let mut mesh = Mesh::from_source(&generator, &built_from);
        if let Some(label) = texture.label() {
            mesh = mesh.with_label(label.to_string());
        }

        let plane = Arc::new_cyclic(|self_ref| Self {
            self_ref: self_ref.clone(),
            state: RwLock::new(PlaneState {
                texture: texture.clone(),
                generator,
                mesh,
            }),
        });

        texture.subscribe(plane.listener());
        if texture.region() != built_from {
            plane.refresh();
        }

        log::debug!(
            "Plane created: {}x{} grid over texture {:?}",
            segments.x(),
            segments.y(),
            texture.label()
        );

        plane
    }

    /// Create a plane from a loaded [`PlaneConfig`].
    pub fn from_config(texture: Texture, config: &PlaneConfig) -> Result<Arc<Self>, MeshError> {
        let segments = config.segments()?;
        Ok(Self::new(texture, segments, config.grid_config()))
    }

    fn listener(&self) -> Weak<dyn TextureListener> {
        self.self_ref.clone()
    }

    /// Regenerate all buffers from the current texture, segments and config.
    pub fn refresh(&self) {
        crate::profile_scope!("plane_refresh");
        let mut state = self.state.write();
        state.refresh();
        crate::profile_plot!("plane_vertices", state.mesh.buffers().vertex_count());
    }

    /// Swap the texture and regenerate.
    pub fn set_texture(&self, texture: Texture) {
        let mut state = self.state.write();
        if Texture::ptr_eq(&state.texture, &texture) {
            state.refresh();
            return;
        }

        let listener = self.listener();
        state.texture.unsubscribe(&listener);
        texture.subscribe(listener);
        state.texture = texture;
        state.refresh();
    }

    /// Change the grid resolution and regenerate.
    pub fn set_segments(&self, segments: GridSegments) {
        let mut state = self.state.write();
        state.generator.segments = segments;
        state.refresh();
    }

    /// Change the size overrides and regenerate.
    pub fn set_config(&self, config: GridConfig) {
        let mut state = self.state.write();
        state.generator.config = config;
        state.refresh();
    }

    /// Move a single grid point.
    pub fn set_vertex(&self, index: usize, position: Vec2) -> Result<(), MeshError> {
        self.state.write().mesh.set_vertex(index, position)
    }

    /// Run `f` with read access to the mesh.
    ///
    /// The plane stays read-locked while `f` runs, so `f` must not modify the
    /// plane or update its texture.
    pub fn with_mesh<R>(&self, f: impl FnOnce(&Mesh) -> R) -> R {
        f(&self.state.read().mesh)
    }

    /// Get a copy of the current buffers.
    pub fn buffers(&self) -> MeshBuffers {
        self.state.read().mesh.buffers().clone()
    }

    /// Get the mesh upload revision.
    pub fn revision(&self) -> u64 {
        self.state.read().mesh.revision()
    }

    /// Get the grid resolution.
    pub fn segments(&self) -> GridSegments {
        self.state.read().generator.segments
    }

    /// Get the size overrides.
    pub fn config(&self) -> GridConfig {
        self.state.read().generator.config
    }

    /// Get a handle to the current texture.
    pub fn texture(&self) -> Texture {
        self.state.read().texture.clone()
    }
}

impl TextureListener for Plane {
    fn on_texture_changed(&self, texture: &Texture) {
        let mut state = self.state.write();
        if !Texture::ptr_eq(&state.texture, texture) {
            // Stale subscription from a texture this plane no longer uses
            return;
        }
        log::debug!("Plane: texture {:?} changed, regenerating", texture.label());
        state.refresh();
    }
}

impl Drop for Plane {
    fn drop(&mut self) {
        let listener = self.listener();
        self.state.get_mut().texture.unsubscribe(&listener);
    }
}

impl std::fmt::Debug for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Plane")
            .field("segments", &state.generator.segments)
            .field("config", &state.generator.config)
            .field("texture", &state.texture.label())
            .field("revision", &state.mesh.revision())
            .finish()
    }
}
