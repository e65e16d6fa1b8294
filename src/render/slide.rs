use crate::deck::model::{RenderConfig, SlideChunk};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{SlideforgeError, SlideforgeResult};
use crate::render::surface::SurfaceRGBA;
use crate::render::watermark;
use crate::text::fonts::{FontFace, FontLibrary};
use crate::text::shaper::{TextBrushRgba8, TextShaper};
use crate::text::wrap::{LineLayout, wrap};
use std::collections::HashMap;

const BODY_COLOR: Rgba8 = Rgba8::BLACK;
const SIGNATURE_COLOR: Rgba8 = Rgba8::opaque(0x66, 0x66, 0x66);
const RULE_COLOR: Rgba8 = Rgba8::opaque(0xEE, 0xEE, 0xEE);

const SIGNATURE_SIZE_PX: f32 = 35.0;
const PAGE_INDEX_SIZE_PX: f32 = 24.0;

/// Signature baseline offset from the bottom edge.
const SIGNATURE_BASELINE_FROM_BOTTOM: f64 = 120.0;
/// Decorative rule center offset from the bottom edge.
const RULE_FROM_BOTTOM: f64 = 145.0;
const RULE_WIDTH: f64 = 200.0;
const RULE_THICKNESS: f64 = 2.0;
/// Page-index center offset from the bottom edge.
const PAGE_INDEX_FROM_BOTTOM: f64 = 60.0;

/// Composes slides onto the fixed 1080x1080 canvas.
///
/// A renderer holds per-worker state (Parley contexts, a reusable CPU render
/// context and per-family font data); the [`FontLibrary`] is shared and
/// read-only, so workers can be created freely for parallel rendering.
///
/// Rendering is a pure function of `(chunk, total_slides, config)`:
/// identical arguments produce byte-identical surfaces. No randomness and no
/// timestamps reach the visible layer.
pub struct SlideRenderer {
    fonts: FontLibrary,
    shaper: TextShaper,
    canvas: Canvas,
    ctx: Option<vello_cpu::RenderContext>,
    font_data: HashMap<String, vello_cpu::peniko::FontData>,
}

impl SlideRenderer {
    /// Create a renderer over `fonts` for the fixed slide canvas.
    pub fn new(fonts: FontLibrary) -> Self {
        Self {
            fonts,
            shaper: TextShaper::new(),
            canvas: Canvas::SLIDE,
            ctx: None,
            font_data: HashMap::new(),
        }
    }

    /// The canvas every surface from this renderer uses.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Compose one chunk onto a fresh surface.
    ///
    /// Layering order: white background, signature band (when the trimmed
    /// signature is non-empty), body text block, page index, and finally the
    /// free-tier watermark when `config.tier` is watermarked.
    #[tracing::instrument(skip_all, fields(slide = chunk.index))]
    pub fn render(
        &mut self,
        chunk: &SlideChunk,
        total_slides: u32,
        config: &RenderConfig,
    ) -> SlideforgeResult<SurfaceRGBA> {
        if chunk.index >= total_slides {
            return Err(SlideforgeError::render(format!(
                "slide index {} out of range for a deck of {total_slides}",
                chunk.index
            )));
        }

        let face = self.fonts.resolve(&config.font_family)?.clone();
        let font = self.font_data_for(&face);
        let canvas = self.canvas;
        let w = canvas.width as f64;
        let h = canvas.height as f64;

        let body_size = config.font_size_px as f32;
        let lines = wrap(
            &chunk.text,
            &face,
            body_size,
            canvas.max_line_width_px(),
            &mut self.shaper,
        )?;
        let layout = LineLayout::compute(lines, config.font_size_px, canvas.height);

        let mut body = Vec::with_capacity(layout.lines.len());
        for line in &layout.lines {
            body.push(
                self.shaper
                    .layout_line(line, &face, body_size, BODY_COLOR.into())?,
            );
        }
        let signature = config.signature_trimmed().to_uppercase();
        let sig = if signature.is_empty() {
            None
        } else {
            Some(self.shaper.layout_line(
                &signature,
                &face,
                SIGNATURE_SIZE_PX,
                SIGNATURE_COLOR.into(),
            )?)
        };
        let page = self.shaper.layout_line(
            &(chunk.index + 1).to_string(),
            &face,
            PAGE_INDEX_SIZE_PX,
            BODY_COLOR.into(),
        )?;

        let mut pixmap = vello_cpu::Pixmap::new(canvas.width as u16, canvas.height as u16);
        self.with_ctx(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color(Rgba8::WHITE));
            ctx.fill_rect(&rect_to_cpu(kurbo::Rect::new(0.0, 0.0, w, h)));

            // Signature band sits under the body text layer.
            if let Some(sig) = &sig {
                draw_layout_centered(
                    ctx,
                    sig,
                    &font,
                    w / 2.0,
                    h - SIGNATURE_BASELINE_FROM_BOTTOM,
                    VAnchor::Baseline,
                );
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(color(RULE_COLOR));
                ctx.fill_rect(&rect_to_cpu(kurbo::Rect::new(
                    w / 2.0 - RULE_WIDTH / 2.0,
                    h - RULE_FROM_BOTTOM - RULE_THICKNESS / 2.0,
                    w / 2.0 + RULE_WIDTH / 2.0,
                    h - RULE_FROM_BOTTOM + RULE_THICKNESS / 2.0,
                )));
            }

            for (i, line) in body.iter().enumerate() {
                draw_layout_centered(
                    ctx,
                    line,
                    &font,
                    w / 2.0,
                    layout.line_center_px(i) as f64,
                    VAnchor::Middle,
                );
            }

            draw_layout_centered(
                ctx,
                &page,
                &font,
                w / 2.0,
                h - PAGE_INDEX_FROM_BOTTOM,
                VAnchor::Middle,
            );

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        let mut surface = SurfaceRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        };
        if config.tier.is_watermarked() {
            self.watermark_surface(&mut surface, &face, &font)?;
        }
        Ok(surface)
    }

    /// Overlay the free-tier watermark onto `surface`, in place.
    ///
    /// Not idempotent: applying twice doubles the visible opacity. The
    /// renderer already composes the overlay once, last, whenever the config
    /// tier is watermarked — callers only need this for surfaces they
    /// rendered clean themselves.
    pub fn apply_watermark(
        &mut self,
        surface: &mut SurfaceRGBA,
        config: &RenderConfig,
    ) -> SlideforgeResult<()> {
        if surface.width != self.canvas.width || surface.height != self.canvas.height {
            return Err(SlideforgeError::render(
                "surface does not match the renderer canvas",
            ));
        }
        if surface.data.len() != surface.expected_len() {
            return Err(SlideforgeError::render("surface buffer length mismatch"));
        }

        let face = self.fonts.resolve(&config.font_family)?.clone();
        let font = self.font_data_for(&face);
        self.watermark_surface(surface, &face, &font)
    }

    /// Composite the watermark layers over `surface`'s current pixels.
    fn watermark_surface(
        &mut self,
        surface: &mut SurfaceRGBA,
        face: &FontFace,
        font: &vello_cpu::peniko::FontData,
    ) -> SlideforgeResult<()> {
        let canvas = self.canvas;
        let layers = watermark::build_layers(&mut self.shaper, face, canvas)?;

        let mut pixmap = pixmap_from_surface(surface)?;
        self.with_ctx(|ctx| {
            watermark::draw(ctx, &layers, font, canvas);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;
        surface.data.copy_from_slice(pixmap.data_as_u8_slice());
        Ok(())
    }

    fn font_data_for(&mut self, face: &FontFace) -> vello_cpu::peniko::FontData {
        if let Some(f) = self.font_data.get(face.family()) {
            return f.clone();
        }
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes().to_vec()),
            0,
        );
        self.font_data.insert(face.family().to_string(), data.clone());
        data
    }

    fn with_ctx<R>(
        &mut self,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> SlideforgeResult<R>,
    ) -> SlideforgeResult<R> {
        let width = self.canvas.width as u16;
        let height = self.canvas.height as u16;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx);
        self.ctx = Some(ctx);
        out
    }
}

/// Vertical anchor for centered single-line text.
pub(crate) enum VAnchor {
    /// `y` is the text baseline.
    Baseline,
    /// `y` is the vertical center of the shaped line.
    Middle,
}

pub(crate) fn color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

/// Draw a single-line layout with its horizontal center at `center_x`,
/// vertically anchored at `y`.
pub(crate) fn draw_layout_centered(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    center_x: f64,
    y: f64,
    anchor: VAnchor,
) {
    let ty = match anchor {
        VAnchor::Baseline => {
            let baseline = layout
                .lines()
                .next()
                .map(|l| l.metrics().baseline)
                .unwrap_or(0.0);
            y - baseline as f64
        }
        VAnchor::Middle => y - (layout.height() as f64) / 2.0,
    };
    let tx = center_x - (layout.width() as f64) / 2.0;
    draw_layout(ctx, layout, font, kurbo::Affine::translate((tx, ty)));
}

/// Replay a shaped layout's glyph runs under `transform`.
pub(crate) fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    transform: kurbo::Affine,
) {
    ctx.set_transform(affine_to_cpu(transform));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn pixmap_from_surface(surface: &SurfaceRGBA) -> SlideforgeResult<vello_cpu::Pixmap> {
    let w: u16 = surface
        .width
        .try_into()
        .map_err(|_| SlideforgeError::render("surface width exceeds u16"))?;
    let h: u16 = surface
        .height
        .try_into()
        .map_err(|_| SlideforgeError::render("surface height exceeds u16"))?;

    // Slide surfaces are opaque, so straight RGBA8 and the pixmap's
    // premultiplied storage coincide byte-for-byte.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (surface.width as usize) * (surface.height as usize),
    );
    for px in surface.data.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}
