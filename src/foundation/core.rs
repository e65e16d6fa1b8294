use crate::foundation::error::{SlideforgeError, SlideforgeResult};

/// Output canvas dimensions in pixels.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed square canvas used for carousel slides (standard
    /// social-media resolution).
    pub const SLIDE: Canvas = Canvas {
        width: 1080,
        height: 1080,
    };

    /// Horizontal margin reserved on each side of the body text block.
    pub const BODY_MARGIN_PX: u32 = 100;

    /// Create a validated canvas.
    ///
    /// The CPU rasterizer addresses surfaces with 16-bit coordinates, so
    /// both dimensions must fit in a `u16`.
    pub fn new(width: u32, height: u32) -> SlideforgeResult<Self> {
        if width == 0 || height == 0 {
            return Err(SlideforgeError::validation(
                "canvas dimensions must be non-zero",
            ));
        }
        if width > u16::MAX as u32 || height > u16::MAX as u32 {
            return Err(SlideforgeError::validation(
                "canvas dimensions must fit in u16",
            ));
        }
        Ok(Self { width, height })
    }

    /// Maximum body line width for this canvas, after margins.
    pub fn max_line_width_px(self) -> f32 {
        self.width.saturating_sub(2 * Self::BODY_MARGIN_PX) as f32
    }

    /// Byte length of one RGBA8 surface of this size.
    pub fn byte_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight, not premultiplied).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::opaque(0, 0, 0);

    /// Fully opaque color from channel values.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a replaced alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
