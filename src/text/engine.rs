use std::collections::HashMap;

use crate::{
    foundation::error::{ComposeError, ComposeResult},
    layout::wrap::TextMeasure,
    text::builtin::BuiltinFont,
    text::font::{CaptionFont, FontFace, OutlineFace},
};

/// Reference string whose vertical extent defines the caption line height.
pub const LINE_SAMPLE: &str = "Hg";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl TextBrushRgba8 {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Stateful helper for shaping single caption lines with Parley.
///
/// Not `Sync`: each worker thread owns one. Faces are registered once per engine, keyed by
/// [`OutlineFace::fingerprint`].
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<u64, String>,
    glyph_fonts: HashMap<u64, vello_cpu::peniko::FontData>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    /// Construct a new engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
            glyph_fonts: HashMap::new(),
        }
    }

    /// Register `face` (once) and return the family name Parley knows it by.
    pub fn family_for(&mut self, face: &OutlineFace) -> ComposeResult<String> {
        if let Some(name) = self.families.get(&face.fingerprint()) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.data.as_ref().clone()),
            None,
        );
        let mut names = Vec::with_capacity(families.len());
        for (id, _) in &families {
            if let Some(name) = self.font_ctx.collection.family_name(*id) {
                names.push(name.to_string());
            }
        }

        let family = face
            .family_hint
            .as_ref()
            .and_then(|hint| names.iter().find(|n| n.eq_ignore_ascii_case(hint)))
            .or_else(|| names.first())
            .cloned()
            .ok_or_else(|| {
                ComposeError::render(format!(
                    "no font families registered from '{}'",
                    face.origin
                ))
            })?;

        self.families.insert(face.fingerprint(), family.clone());
        Ok(family)
    }

    /// Shape `text` as one unwrapped line.
    pub fn layout_line(
        &mut self,
        face: &OutlineFace,
        size_px: f32,
        text: &str,
    ) -> ComposeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ComposeError::render(
                "text size_px must be finite and > 0",
            ));
        }
        let family = self.family_for(face)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::WHITE));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// True when `face` alone shapes every character of `text` to a real glyph.
    pub fn covers(&mut self, face: &OutlineFace, size_px: f32, text: &str) -> ComposeResult<bool> {
        let layout = self.layout_line(face, size_px, text)?;
        let mut glyphs = 0usize;
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                for g in run.glyphs() {
                    if g.id == 0 {
                        return Ok(false);
                    }
                    glyphs += 1;
                }
            }
        }
        Ok(glyphs > 0)
    }

    /// Ascent and descent of the first line of `text`.
    pub fn vertical_metrics(
        &mut self,
        face: &OutlineFace,
        size_px: f32,
        text: &str,
    ) -> ComposeResult<(f32, f32)> {
        let layout = self.layout_line(face, size_px, text)?;
        let line = layout
            .lines()
            .next()
            .ok_or_else(|| ComposeError::render("sample text produced no line"))?;
        let m = line.metrics();
        Ok((m.ascent, m.descent))
    }

    /// Rasterizer-side handle of `face`, cached per engine.
    pub fn glyph_font(&mut self, face: &OutlineFace) -> vello_cpu::peniko::FontData {
        self.glyph_fonts
            .entry(face.fingerprint())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.data.as_ref().clone()),
                    face.index,
                )
            })
            .clone()
    }
}

/// [`TextMeasure`] backed by a resolved [`CaptionFont`].
pub struct FontMeasure<'a> {
    engine: &'a mut TextEngine,
    font: &'a CaptionFont,
}

impl<'a> FontMeasure<'a> {
    /// Registers outline faces up front so that measuring cannot fail afterwards.
    pub fn new(engine: &'a mut TextEngine, font: &'a CaptionFont) -> ComposeResult<Self> {
        if let FontFace::Outline(face) = &font.face {
            engine.family_for(face)?;
        }
        Ok(Self { engine, font })
    }

    fn builtin(&self) -> BuiltinFont {
        BuiltinFont::new(self.font.size_px)
    }
}

impl TextMeasure for FontMeasure<'_> {
    fn text_width(&mut self, text: &str) -> f32 {
        match &self.font.face {
            FontFace::Builtin(b) => b.text_width(text),
            FontFace::Outline(face) => {
                match self.engine.layout_line(face, self.font.size_px, text) {
                    Ok(layout) => layout.width(),
                    Err(e) => {
                        tracing::warn!(error = %e, "outline measurement failed, using bitmap metrics");
                        self.builtin().text_width(text)
                    }
                }
            }
        }
    }

    fn line_extent(&mut self) -> f32 {
        match &self.font.face {
            FontFace::Builtin(b) => b.ascent() + b.descent(),
            FontFace::Outline(face) => {
                match self
                    .engine
                    .vertical_metrics(face, self.font.size_px, LINE_SAMPLE)
                {
                    Ok((ascent, descent)) => ascent + descent,
                    Err(e) => {
                        tracing::warn!(error = %e, "outline metrics failed, using bitmap metrics");
                        let b = self.builtin();
                        b.ascent() + b.descent()
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
