use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::error::AdjustError;

/// File name offered for the adjusted download.
pub const EXPORT_FILE_NAME: &str = "adjusted-image.png";

/// Extensions accepted by the native file picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif"];

/// Decode an uploaded file into an RGBA raster, sniffing the format.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, AdjustError> {
    let img = image::load_from_memory(bytes).map_err(AdjustError::DecodeFailure)?;
    Ok(img.to_rgba8())
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, AdjustError> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(AdjustError::Encode)?;
    Ok(out.into_inner())
}

/// Scale factor that fits `width x height` inside `max_width x max_height`,
/// preserving aspect ratio. Never upscales.
pub fn fit_scale(width: u32, height: u32, max_width: f32, max_height: f32) -> f32 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    let sx = max_width.max(1.0) / width as f32;
    let sy = max_height.max(1.0) / height as f32;
    f32::min(sx, sy).min(1.0)
}

/// Downscaled copy of `img` for on-screen display.
///
/// The result is at most `max_width` pixels wide and no side exceeds
/// `max_side` (the renderer's texture limit). Export keeps using the full
/// resolution image.
pub fn preview_image(img: &RgbaImage, max_width: f32, max_side: u32) -> RgbaImage {
    let max_side = max_side.max(1);
    let (w, h) = img.dimensions();
    let scale = fit_scale(w, h, max_width.min(max_side as f32), max_side as f32);
    if scale >= 1.0 {
        return img.clone();
    }
    let nw = ((w as f32 * scale).round() as u32).clamp(1, max_side);
    let nh = ((h as f32 * scale).round() as u32).clamp(1, max_side);
    imageops::resize(img, nw, nh, FilterType::Triangle)
}

/// On-screen size of a `width x height` image after [`fit_scale`].
pub fn display_size(width: u32, height: u32, max_width: f32, max_height: f32) -> (f32, f32) {
    let scale = fit_scale(width, height, max_width, max_height);
    (width as f32 * scale, height as f32 * scale)
}
