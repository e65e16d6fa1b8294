//! Free-tier watermark overlay.
//!
//! Two cosmetic layers composed over a finished slide: a tiled diagonal
//! label and a bottom attribution banner. Neither carries functional state.

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::SlideforgeResult;
use crate::render::slide::{
    VAnchor, affine_to_cpu, color, draw_layout, draw_layout_centered, rect_to_cpu,
};
use crate::text::fonts::FontFace;
use crate::text::shaper::{TextBrushRgba8, TextShaper};

/// Repeating diagonal label.
pub(crate) const TILE_LABEL: &str = "SLIDEFORGE FREE";
/// Attribution line inside the bottom banner.
pub(crate) const BANNER_LABEL: &str = "MADE WITH SLIDEFORGE FREE";

/// Banner height as a fraction of the canvas height.
pub(crate) const BANNER_HEIGHT_FRAC: f64 = 0.08;

const TILE_OPACITY: f32 = 0.12;
/// Tile grid spacing as a fraction of the canvas width.
const TILE_STEP_FRAC: f64 = 0.35;
/// Tile label font size as a fraction of the canvas width.
const TILE_SIZE_FRAC: f64 = 0.045;

/// Layer opacity applied to the banner rectangle.
const BANNER_RECT_OPACITY: f32 = 0.55;
/// Banner rectangle fill: black at 0.6 alpha.
const BANNER_RECT_ALPHA: u8 = 153;
/// Banner text fill: white at 0.4 alpha.
const BANNER_TEXT_ALPHA: u8 = 102;
/// Banner text font size as a fraction of the canvas height.
const BANNER_SIZE_FRAC: f64 = 0.022;

/// Shaped text layers of the watermark, reusable across draws on one
/// canvas/typeface combination.
pub(crate) struct WatermarkLayers {
    tile: parley::Layout<TextBrushRgba8>,
    banner: parley::Layout<TextBrushRgba8>,
}

/// Shape the two watermark text layers for `canvas`.
pub(crate) fn build_layers(
    shaper: &mut TextShaper,
    face: &FontFace,
    canvas: Canvas,
) -> SlideforgeResult<WatermarkLayers> {
    let tile_size = (canvas.width as f64 * TILE_SIZE_FRAC).round() as f32;
    let banner_size = (canvas.height as f64 * BANNER_SIZE_FRAC).round() as f32;
    Ok(WatermarkLayers {
        tile: shaper.layout_line(TILE_LABEL, face, tile_size, Rgba8::WHITE.into())?,
        banner: shaper.layout_line(
            BANNER_LABEL,
            face,
            banner_size,
            Rgba8::WHITE.with_alpha(BANNER_TEXT_ALPHA).into(),
        )?,
    })
}

/// Record the watermark draw commands over the current slide content.
///
/// Applying the overlay twice doubles the visible opacity; the renderer
/// composes it exactly once, after every other layer.
pub(crate) fn draw(
    ctx: &mut vello_cpu::RenderContext,
    layers: &WatermarkLayers,
    font: &vello_cpu::peniko::FontData,
    canvas: Canvas,
) {
    let w = canvas.width as f64;
    let h = canvas.height as f64;

    // Tiled marks rotate 45 degrees about the canvas center; tile origins
    // extend one full canvas beyond each edge so the rotated grid still
    // covers the corners.
    let base = kurbo::Affine::translate((w / 2.0, h / 2.0))
        * kurbo::Affine::rotate(-std::f64::consts::FRAC_PI_4);
    let step = w * TILE_STEP_FRAC;
    let tile_w = layers.tile.width() as f64;
    let tile_h = layers.tile.height() as f64;

    ctx.push_opacity_layer(TILE_OPACITY);
    let mut x = -w;
    while x < w * 1.5 {
        let mut y = -h;
        while y < h * 1.5 {
            let tile = base * kurbo::Affine::translate((x - tile_w / 2.0, y - tile_h / 2.0));
            draw_layout(ctx, &layers.tile, font, tile);
            y += step;
        }
        x += step;
    }
    ctx.pop_layer();

    let banner_top = h - h * BANNER_HEIGHT_FRAC;
    ctx.set_transform(affine_to_cpu(kurbo::Affine::IDENTITY));
    ctx.push_opacity_layer(BANNER_RECT_OPACITY);
    ctx.set_paint(color(Rgba8::BLACK.with_alpha(BANNER_RECT_ALPHA)));
    ctx.fill_rect(&rect_to_cpu(kurbo::Rect::new(0.0, banner_top, w, h)));
    ctx.pop_layer();

    draw_layout_centered(
        ctx,
        &layers.banner,
        font,
        w / 2.0,
        h - (h * BANNER_HEIGHT_FRAC) / 2.0,
        VAnchor::Middle,
    );
}
