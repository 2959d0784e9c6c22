use std::path::Path;

use image::{RgbaImage, imageops};

use crate::{
    assets::decode::load_overlay,
    foundation::error::{ComposeError, ComposeResult},
};

/// Overlay size as a fraction of the canvas, per axis.
pub const OVERLAY_SCALE: f64 = 0.25;
/// Top-left corner of the overlay as a fraction of the canvas, per axis.
pub const OVERLAY_ANCHOR: f64 = 0.65;

/// Load the overlay at `path`, scale it and paste it onto `canvas` through its alpha.
pub fn apply_overlay(canvas: &mut RgbaImage, path: &Path) -> ComposeResult<()> {
    let overlay = load_overlay(path).map_err(|e| ComposeError::overlay_apply(path, e))?;
    paste_overlay(canvas, &overlay).map_err(|e| ComposeError::overlay_apply(path, e))
}

/// Paste an already decoded overlay.
pub fn paste_overlay(canvas: &mut RgbaImage, overlay: &RgbaImage) -> ComposeResult<()> {
    let (w, h) = (canvas.width(), canvas.height());
    let ow = (f64::from(w) * OVERLAY_SCALE) as u32;
    let oh = (f64::from(h) * OVERLAY_SCALE) as u32;
    if ow == 0 || oh == 0 {
        return Err(ComposeError::render(format!(
            "canvas {w}x{h} too small for an overlay"
        )));
    }
    if overlay.width() == 0 || overlay.height() == 0 {
        return Err(ComposeError::render("overlay image is empty"));
    }

    let scaled = imageops::resize(overlay, ow, oh, imageops::FilterType::CatmullRom);
    let x = (f64::from(w) * OVERLAY_ANCHOR) as i64;
    let y = (f64::from(h) * OVERLAY_ANCHOR) as i64;
    imageops::overlay(canvas, &scaled, x, y);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
