use crate::foundation::core::Rgba8;
use crate::foundation::error::{SlideforgeError, SlideforgeResult};
use crate::text::fonts::FontFace;
use std::collections::HashMap;

/// RGBA8 brush color carried through Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper for shaping and measuring text through Parley.
///
/// This is the single font resolution path for the whole crate: the line
/// breaker measures through it and the renderer draws the layouts it
/// produces, so measured and drawn widths can never disagree.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    // Family name as registered in the library -> family name as resolved by
    // the font collection. Registration happens once per face.
    resolved: HashMap<String, String>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    /// Construct a shaper with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            resolved: HashMap::new(),
        }
    }

    fn resolved_family(&mut self, face: &FontFace) -> SlideforgeResult<String> {
        if let Some(name) = self.resolved.get(face.family()) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes().to_vec()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            SlideforgeError::layout(format!(
                "no font families registered from '{}' font bytes",
                face.family()
            ))
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SlideforgeError::layout("registered font family has no name"))?
            .to_string();

        self.resolved.insert(face.family().to_string(), name.clone());
        Ok(name)
    }

    /// Shape one line of text; no wrapping is applied.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> SlideforgeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SlideforgeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.resolved_family(face)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Measured advance width of `text` in pixels, trailing whitespace
    /// included.
    pub fn measure_width(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
    ) -> SlideforgeResult<f32> {
        let layout = self.layout_line(text, face, size_px, TextBrushRgba8::default())?;
        Ok(layout.full_width())
    }
}
