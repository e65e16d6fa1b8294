use crate::foundation::error::SlideforgeResult;
use crate::text::fonts::FontFace;
use crate::text::shaper::TextShaper;
use smallvec::SmallVec;

/// Greedy word wrap of `text` against a measured pixel width.
///
/// The text is upper-cased before wrapping (slide body text always renders
/// upper-case). Words are accumulated while the measured width of
/// `line + word + " "` stays within `max_width_px`; the committed lines are
/// trimmed. Words never split: a single word wider than the budget is
/// placed alone on its own line and allowed to overflow (accepted layout
/// overflow, not an error). The final partial line is always committed.
pub fn wrap(
    text: &str,
    face: &FontFace,
    size_px: f32,
    max_width_px: f32,
    shaper: &mut TextShaper,
) -> SlideforgeResult<Vec<String>> {
    let upper = text.to_uppercase();

    let mut lines: SmallVec<[String; 8]> = SmallVec::new();
    let mut current = String::new();
    for word in upper.split(' ').filter(|w| !w.is_empty()) {
        let mut candidate = String::with_capacity(current.len() + word.len() + 1);
        candidate.push_str(&current);
        candidate.push_str(word);
        candidate.push(' ');

        if !current.is_empty()
            && shaper.measure_width(&candidate, face, size_px)? > max_width_px
        {
            lines.push(current.trim_end().to_string());
            current.clear();
            current.push_str(word);
            current.push(' ');
        } else {
            current = candidate;
        }
    }
    let last = current.trim_end();
    if !last.is_empty() {
        lines.push(last.to_string());
    }

    Ok(lines.into_vec())
}

/// Vertical layout of one chunk's wrapped lines on a canvas.
///
/// Derived deterministically from the wrapped lines and the body font size;
/// the block is centered vertically. `block_top_px` may be negative when a
/// long unsplit paragraph overflows the canvas — overflowing lines are
/// clipped by the rasterizer, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// Wrapped display lines, in order.
    pub lines: Vec<String>,
    /// Vertical advance per line in pixels.
    pub line_height_px: f32,
    /// Top edge of the vertically centered text block.
    pub block_top_px: f32,
}

impl LineLayout {
    /// Line-height multiplier applied to the body font size.
    pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

    /// Compute the vertical placement of `lines` centered on a canvas
    /// `canvas_height_px` tall.
    pub fn compute(lines: Vec<String>, font_size_px: u32, canvas_height_px: u32) -> Self {
        let line_height_px = font_size_px as f32 * Self::LINE_HEIGHT_FACTOR;
        let total_height = lines.len() as f32 * line_height_px;
        let block_top_px = (canvas_height_px as f32 - total_height) / 2.0;
        Self {
            lines,
            line_height_px,
            block_top_px,
        }
    }

    /// Top edge of line `i`'s box.
    pub fn line_top_px(&self, i: usize) -> f32 {
        self.block_top_px + i as f32 * self.line_height_px
    }

    /// Vertical center of line `i`'s box.
    pub fn line_center_px(&self, i: usize) -> f32 {
        self.line_top_px(i) + self.line_height_px / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
