//! Texture size and atlas sub-region descriptors.

/// A pixel-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Normalized UV corners of a texture frame inside its base texture.
///
/// Corners run clockwise from the top-left:
/// `(x0, y0)` top-left, `(x1, y1)` top-right, `(x2, y2)` bottom-right,
/// `(x3, y3)` bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvFrame {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub x3: f32,
    pub y3: f32,
}

impl Default for UvFrame {
    /// The frame covering the whole base texture.
    fn default() -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            x1: 1.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
            x3: 0.0,
            y3: 1.0,
        }
    }
}

impl UvFrame {
    /// Build the UV corners of `frame` placed inside a base texture of
    /// `base_width` x `base_height` pixels.
    ///
    /// A zero base dimension yields zero coordinates along that axis.
    pub fn from_frame(frame: PixelRect, base_width: f32, base_height: f32) -> Self {
        let nx = |v: f32| if base_width > 0.0 { v / base_width } else { 0.0 };
        let ny = |v: f32| if base_height > 0.0 { v / base_height } else { 0.0 };

        let left = nx(frame.x);
        let right = nx(frame.x + frame.width);
        let top = ny(frame.y);
        let bottom = ny(frame.y + frame.height);

        Self {
            x0: left,
            y0: top,
            x1: right,
            y1: top,
            x2: right,
            y2: bottom,
            x3: left,
            y3: bottom,
        }
    }

    /// Build a frame from its horizontal and vertical bounds.
    pub fn from_bounds(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x0: left,
            y0: top,
            x1: right,
            y1: top,
            x2: right,
            y2: bottom,
            x3: left,
            y3: bottom,
        }
    }

    /// Horizontal UV extent of the frame.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Vertical UV extent of the frame.
    pub fn height(&self) -> f32 {
        self.y2 - self.y0
    }
}

/// The portion of a texture a mesh samples from.
///
/// `width` and `height` are the frame's size in pixels. When `uv_frame` is
/// set, the texture is packed inside a larger atlas and only that normalized
/// sub-rectangle should be sampled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextureRegion {
    pub width: f32,
    pub height: f32,
    pub uv_frame: Option<UvFrame>,
}

impl TextureRegion {
    /// A standalone texture of the given pixel size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            uv_frame: None,
        }
    }

    /// A texture frame packed inside an atlas of `atlas_width` x `atlas_height` pixels.
    pub fn from_atlas(frame: PixelRect, atlas_width: f32, atlas_height: f32) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            uv_frame: Some(UvFrame::from_frame(frame, atlas_width, atlas_height)),
        }
    }

    /// Set the atlas UV frame.
    pub fn with_uv_frame(mut self, frame: UvFrame) -> Self {
        self.uv_frame = Some(frame);
        self
    }

    /// Check whether this region is a slice of a larger atlas.
    pub fn is_atlas_frame(&self) -> bool {
        self.uv_frame.is_some()
    }
}
