use crate::foundation::error::{SlideforgeError, SlideforgeResult};
use crate::render::surface::SurfaceRGBA;
use std::io::Cursor;

/// Encode one surface to an in-memory PNG.
///
/// Fails with [`SlideforgeError::Encode`] on malformed buffers; export
/// batches treat any single failure as fatal for the whole batch.
pub fn encode_png(surface: &SurfaceRGBA) -> SlideforgeResult<Vec<u8>> {
    if surface.width == 0 || surface.height == 0 {
        return Err(SlideforgeError::encode(
            "cannot encode a surface with zero dimensions",
        ));
    }
    if surface.data.len() != surface.expected_len() {
        return Err(SlideforgeError::encode(format!(
            "surface buffer length {} does not match {}x{} RGBA8",
            surface.data.len(),
            surface.width,
            surface.height
        )));
    }

    let img = image::RgbaImage::from_raw(surface.width, surface.height, surface.data.clone())
        .ok_or_else(|| SlideforgeError::encode("surface buffer rejected by image"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| SlideforgeError::encode(format!("png encode failed: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
