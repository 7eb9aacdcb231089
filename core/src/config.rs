//! Plane configuration loaded from TOML.
//!
//! ```toml
//! segments_x = 20
//! segments_y = 4
//! mesh_width = 512.0   # optional
//! mesh_height = 64.0   # optional
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::MeshError;
use crate::mesh::{DEFAULT_SEGMENTS, GridConfig, GridSegments};

/// Grid layout and size overrides for a plane.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlaneConfig {
    #[serde(default = "default_segments")]
    pub segments_x: u32,
    #[serde(default = "default_segments")]
    pub segments_y: u32,
    #[serde(default)]
    pub mesh_width: Option<f32>,
    #[serde(default)]
    pub mesh_height: Option<f32>,
}

fn default_segments() -> u32 {
    DEFAULT_SEGMENTS
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            segments_x: DEFAULT_SEGMENTS,
            segments_y: DEFAULT_SEGMENTS,
            mesh_width: None,
            mesh_height: None,
        }
    }
}

impl PlaneConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, MeshError> {
        toml::from_str(content).map_err(|e| MeshError::Config(format!("failed to parse: {e}")))
    }

    /// Validated segment counts.
    pub fn segments(&self) -> Result<GridSegments, MeshError> {
        GridSegments::new(self.segments_x, self.segments_y)
    }

    /// Size overrides.
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            mesh_width: self.mesh_width,
            mesh_height: self.mesh_height,
        }
    }
}

/// Load a plane config from a TOML file.
pub fn load_plane_config(path: &Path) -> Result<PlaneConfig, MeshError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| MeshError::Config(format!("failed to read {}: {e}", path.display())))?;
    let config = toml::from_str(&content).map_err(|e| {
        MeshError::Config(format!("failed to parse {}: {e}", path.display()))
    })?;
    log::debug!("Loaded plane config from {}", path.display());
    Ok(config)
}
