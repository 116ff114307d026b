//! PNG preview rendering

use crate::canvas::Canvas;
use image::imageops::FilterType;
use image::{ImageOutputFormat, Rgba, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

/// Largest accepted preview scale factor.
pub const MAX_SCALE: u8 = 64;

/// Largest preview image, in pixels.
pub const MAX_PREVIEW_PIXELS: u64 = 1 << 26;

/// Error type for preview rendering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("{width}x{height} at scale {scale} is too large for a preview image")]
    TooLarge { width: u64, height: u64, scale: u8 },
}

/// Pixel dimensions of an image `scale` times the given size.
fn scaled_size(width: u32, height: u32, scale: u8) -> Result<(u32, u32), PreviewError> {
    let factor = u32::from(scale.max(1));
    let too_large =
        || PreviewError::TooLarge { width: width.into(), height: height.into(), scale };
    let w = width.checked_mul(factor).ok_or_else(too_large)?;
    let h = height.checked_mul(factor).ok_or_else(too_large)?;
    if u64::from(w) * u64::from(h) > MAX_PREVIEW_PIXELS {
        return Err(too_large());
    }
    Ok((w, h))
}

/// Render a canvas to an RGBA image, one image pixel per cell.
pub fn render_canvas(canvas: &Canvas) -> Result<RgbaImage, PreviewError> {
    let too_large = || PreviewError::TooLarge {
        width: canvas.width() as u64,
        height: canvas.height() as u64,
        scale: 1,
    };
    let width = u32::try_from(canvas.width()).map_err(|_| too_large())?;
    let height = u32::try_from(canvas.height()).map_err(|_| too_large())?;
    let (width, height) = scaled_size(width, height, 1)?;

    let mut image = RgbaImage::new(width, height);
    for (y, row) in (0..height).zip(canvas.rows()) {
        for (x, color) in (0..width).zip(row) {
            let [r, g, b] = color.rgb();
            image.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }
    Ok(image)
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges. A factor of 0 or 1 returns the
/// image unchanged.
pub fn scale_image(image: RgbaImage, factor: u8) -> Result<RgbaImage, PreviewError> {
    if factor <= 1 {
        return Ok(image);
    }
    let (w, h) = image.dimensions();
    let (new_w, new_h) = scaled_size(w, h, factor)?;
    Ok(image::imageops::resize(&image, new_w, new_h, FilterType::Nearest))
}

/// Render a canvas at `scale`, checking the final size before drawing.
pub fn render_preview(canvas: &Canvas, scale: u8) -> Result<RgbaImage, PreviewError> {
    let too_large = || PreviewError::TooLarge {
        width: canvas.width() as u64,
        height: canvas.height() as u64,
        scale,
    };
    let width = u32::try_from(canvas.width()).map_err(|_| too_large())?;
    let height = u32::try_from(canvas.height()).map_err(|_| too_large())?;
    scaled_size(width, height, scale)?;
    scale_image(render_canvas(canvas)?, scale)
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageOutputFormat::Png)?;
    Ok(bytes.into_inner())
}
