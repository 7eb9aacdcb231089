//! Texture descriptors consumed by plane meshes.
//!
//! Provides [`TextureRegion`] (pixel size plus optional atlas [`UvFrame`])
//! and the shared [`Texture`] handle that notifies [`TextureListener`]s
//! when its region changes.

mod handle;
mod types;

pub use handle::{Texture, TextureListener};
pub use types::{PixelRect, TextureRegion, UvFrame};
