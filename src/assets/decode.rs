use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage, imageops::FilterType};

use crate::foundation::error::{ComposeError, ComposeResult};

/// Decode encoded image bytes; the format is sniffed from the content, not the file name.
pub fn decode_image(bytes: &[u8]) -> anyhow::Result<DynamicImage> {
    use anyhow::Context;
    image::load_from_memory(bytes).context("decode image from memory")
}

fn read_and_decode(path: &Path) -> ComposeResult<DynamicImage> {
    let bytes = std::fs::read(path).map_err(|e| ComposeError::asset_load(path, e))?;
    decode_image(&bytes).map_err(|e| ComposeError::asset_load(path, format!("{e:#}")))
}

/// Load a background and normalize it to opaque RGB, whatever its source color mode.
pub fn load_background(path: &Path) -> ComposeResult<RgbImage> {
    Ok(read_and_decode(path)?.to_rgb8())
}

/// Load an overlay keeping (or synthesizing) its alpha channel.
pub fn load_overlay(path: &Path) -> ComposeResult<RgbaImage> {
    Ok(read_and_decode(path)?.to_rgba8())
}

/// Scale-and-crop `img` to exactly `width`x`height` when either side is smaller than the target;
/// otherwise return it at native resolution.
pub fn fit_to_canvas(img: RgbImage, width: u32, height: u32) -> RgbImage {
    if !needs_fit(img.dimensions(), (width, height)) {
        return img;
    }
    DynamicImage::ImageRgb8(img)
        .resize_to_fill(width, height, FilterType::Lanczos3)
        .to_rgb8()
}

pub(crate) fn needs_fit(src: (u32, u32), target: (u32, u32)) -> bool {
    src.0 < target.0 || src.1 < target.1
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
