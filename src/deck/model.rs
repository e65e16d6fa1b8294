use crate::foundation::error::{SlideforgeError, SlideforgeResult};
use serde::{Deserialize, Serialize};

/// Smallest accepted body font size in pixels.
pub const MIN_FONT_SIZE_PX: u32 = 40;
/// Largest accepted body font size in pixels.
pub const MAX_FONT_SIZE_PX: u32 = 160;

/// One unit of text destined for exactly one rendered slide.
///
/// Chunks are produced by the chunker, trimmed and non-empty; their order
/// equals the final slide order. A deck of chunks is regenerated wholesale
/// whenever the raw document or the split mode changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideChunk {
    /// 0-based position in the deck.
    pub index: u32,
    /// Trimmed, non-empty slide text.
    pub text: String,
}

/// Billing tier consumed by the watermark gate.
///
/// Entitlement is decided by an external collaborator; the engine only reads
/// the flag and uses it for nothing but the watermark step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free plan: exports carry the watermark overlay.
    Free,
    /// Paid plan: exports are clean.
    Premium,
}

impl Tier {
    /// Return `true` when exports must carry the free-tier watermark.
    pub fn is_watermarked(self) -> bool {
        matches!(self, Tier::Free)
    }
}

/// Read-only styling shared by every slide in one render pass.
///
/// Any field change invalidates every rendered surface of the deck; there is
/// no per-slide patching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Body font size in pixels, in `[MIN_FONT_SIZE_PX, MAX_FONT_SIZE_PX]`.
    pub font_size_px: u32,
    /// Family name of a typeface registered in the font library.
    pub font_family: String,
    /// Signature line drawn near the bottom of each slide; empty disables
    /// the band.
    #[serde(default)]
    pub signature: String,
    /// Billing tier controlling the watermark overlay.
    #[serde(default = "default_tier")]
    pub tier: Tier,
}

fn default_tier() -> Tier {
    Tier::Free
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size_px: 85,
            font_family: "Montserrat".to_string(),
            signature: String::new(),
            tier: Tier::Free,
        }
    }
}

impl RenderConfig {
    /// Validate boundary-supplied values.
    ///
    /// The render path assumes a validated config; sessions call this once
    /// at entry.
    pub fn validate(&self) -> SlideforgeResult<()> {
        if !(MIN_FONT_SIZE_PX..=MAX_FONT_SIZE_PX).contains(&self.font_size_px) {
            return Err(SlideforgeError::validation(format!(
                "font_size_px must be in [{MIN_FONT_SIZE_PX}, {MAX_FONT_SIZE_PX}], got {}",
                self.font_size_px
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(SlideforgeError::validation(
                "font_family must be non-empty",
            ));
        }
        Ok(())
    }

    /// Signature with surrounding whitespace removed; empty disables the
    /// signature band.
    pub fn signature_trimmed(&self) -> &str {
        self.signature.trim()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/model.rs"]
mod tests;
