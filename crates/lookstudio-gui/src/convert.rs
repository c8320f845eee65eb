use anyhow::{Context, Result};
use image::imageops::FilterType;

/// Largest texture side uploaded to the GPU; bigger images are downscaled for display.
const MAX_TEXTURE_SIDE: u32 = 4096;

/// Decode encoded image bytes (PNG, JPEG, WebP) to an egui ColorImage.
///
/// Returns the image and its original pixel size.
pub fn decode_color_image(bytes: &[u8]) -> Result<(egui::ColorImage, [usize; 2])> {
    let decoded = image::load_from_memory(bytes).context("Failed to decode image")?;
    let size = [decoded.width() as usize, decoded.height() as usize];

    let display = if decoded.width() > MAX_TEXTURE_SIDE || decoded.height() > MAX_TEXTURE_SIDE {
        decoded.resize(MAX_TEXTURE_SIDE, MAX_TEXTURE_SIDE, FilterType::Triangle)
    } else {
        decoded
    };

    let rgba = display.to_rgba8();
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width() as usize, rgba.height() as usize],
        rgba.as_raw(),
    );
    Ok((image, size))
}
