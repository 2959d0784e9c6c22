use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{DynamicImage, ImageEncoder, RgbaImage};

use crate::{
    assets::decode::{fit_to_canvas, load_background},
    foundation::{
        config::ComposeConfig,
        error::{ComposeError, ComposeResult},
    },
    layout::wrap::{TextLayout, layout},
    render::{
        caption::{CaptionStyle, draw_caption},
        overlay::apply_overlay,
    },
    text::{
        engine::{FontMeasure, TextEngine},
        font::{CaptionFont, FontCache, FontResolver},
    },
};

/// Share of the image width available to one caption line.
pub const TEXT_WIDTH_RATIO: f32 = 0.65;

/// Everything a composition needs besides its inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposeSettings {
    /// Minimum canvas size; larger backgrounds keep their native resolution.
    pub canvas_width: u32,
    /// Minimum canvas height.
    pub canvas_height: u32,
    /// Caption font size in pixels.
    pub font_size: f32,
    /// Directory receiving batch outputs.
    pub output_dir: PathBuf,
    /// Overlays pasted onto every composition, in order.
    pub overlays: Vec<PathBuf>,
    /// Caption panel and text styling.
    pub style: CaptionStyle,
}

impl ComposeSettings {
    pub fn from_config(cfg: &ComposeConfig) -> Self {
        Self {
            canvas_width: cfg.canvas_width,
            canvas_height: cfg.canvas_height,
            font_size: cfg.font_size,
            output_dir: cfg.output_dir.clone(),
            overlays: cfg.overlays.clone(),
            style: CaptionStyle::default(),
        }
    }
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self::from_config(&ComposeConfig::default())
    }
}

/// Turns one background and one caption into a composed PNG.
///
/// Owns the font cache; `&Compositor` is shared across batch workers while each worker brings its
/// own [`TextEngine`].
#[derive(Debug)]
pub struct Compositor {
    settings: ComposeSettings,
    resolver: FontResolver,
    fonts: FontCache,
}

impl Compositor {
    pub fn new(settings: ComposeSettings, resolver: FontResolver) -> Self {
        Self {
            settings,
            resolver,
            fonts: FontCache::new(),
        }
    }

    /// Settings and the default font fallback chain rooted at `cfg.font_path`.
    pub fn from_config(cfg: &ComposeConfig) -> Self {
        Self::new(
            ComposeSettings::from_config(cfg),
            FontResolver::new(cfg.font_path.clone()),
        )
    }

    pub fn settings(&self) -> &ComposeSettings {
        &self.settings
    }

    pub fn font_cache(&self) -> &FontCache {
        &self.fonts
    }

    /// Caption font at the configured size, resolved on first use.
    pub fn font(&self) -> CaptionFont {
        self.fonts.get_or_resolve(&self.resolver, self.settings.font_size)
    }

    /// Compose and write `output` as PNG, creating its parent directory. Reruns overwrite.
    #[tracing::instrument(skip(self, engine, caption), fields(background = %background.display()))]
    pub fn compose(
        &self,
        engine: &mut TextEngine,
        background: &Path,
        caption: &str,
        output: &Path,
    ) -> ComposeResult<PathBuf> {
        let canvas = self.render(engine, background, caption)?;
        save_png(&canvas, output)?;
        tracing::info!(output = %output.display(), "saved composed image");
        Ok(output.to_path_buf())
    }

    /// Compose in memory. Only an unusable background is an error; caption and overlay problems
    /// are logged and leave that part out.
    pub fn render(
        &self,
        engine: &mut TextEngine,
        background: &Path,
        caption: &str,
    ) -> ComposeResult<RgbaImage> {
        let bg = load_background(background)?;
        let bg = fit_to_canvas(bg, self.settings.canvas_width, self.settings.canvas_height);
        let mut canvas = DynamicImage::ImageRgb8(bg).to_rgba8();

        if !caption.trim().is_empty() {
            self.draw_text(engine, &mut canvas, caption);
        }

        for overlay in &self.settings.overlays {
            if let Err(e) = apply_overlay(&mut canvas, overlay) {
                tracing::warn!(error = %e, "overlay skipped");
            }
        }
        Ok(canvas)
    }

    fn draw_text(&self, engine: &mut TextEngine, canvas: &mut RgbaImage, caption: &str) {
        let font = self.font();
        let err = match self.try_draw_text(engine, canvas, caption, &font) {
            Ok(()) => return,
            Err(e) => e,
        };
        if font.is_builtin() {
            tracing::warn!(error = %err, "caption skipped");
            return;
        }

        tracing::warn!(error = %err, font = font.origin(), "outline caption failed, using built-in font");
        let fallback = CaptionFont::builtin(font.size_px);
        if let Err(e) = self.try_draw_text(engine, canvas, caption, &fallback) {
            tracing::warn!(error = %e, "caption skipped");
        }
    }

    fn try_draw_text(
        &self,
        engine: &mut TextEngine,
        canvas: &mut RgbaImage,
        caption: &str,
        font: &CaptionFont,
    ) -> ComposeResult<()> {
        let max_width = canvas.width() as f32 * TEXT_WIDTH_RATIO;
        let text_layout = caption_layout(engine, font, caption, max_width)?;
        tracing::debug!(
            lines = text_layout.lines.len(),
            strategy = ?text_layout.strategy,
            "caption laid out"
        );
        draw_caption(canvas, &text_layout, font, engine, &self.settings.style)?;
        Ok(())
    }
}

/// Wrap `caption` with `font` metrics.
pub fn caption_layout(
    engine: &mut TextEngine,
    font: &CaptionFont,
    caption: &str,
    max_width: f32,
) -> ComposeResult<TextLayout> {
    let mut measure = FontMeasure::new(engine, font)?;
    Ok(layout(caption, &mut measure, max_width))
}

/// `composed_<index + 1>.png` inside `dir`.
pub fn output_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("composed_{}.png", index + 1))
}

/// Lossless PNG at maximum compression.
pub fn save_png(image: &RgbaImage, path: &Path) -> ComposeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let mut png = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png,
        image::codecs::png::CompressionType::Best,
        image::codecs::png::FilterType::Adaptive,
    );
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ComposeError::render(format!("png encoding failed: {e}")))?;
    std::fs::write(path, png).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
