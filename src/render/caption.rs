use image::RgbaImage;

use crate::{
    foundation::error::{ComposeError, ComposeResult},
    layout::{
        panel::{PanelGeometry, PanelPadding},
        wrap::TextLayout,
    },
    render::composite::over_straight_in_place,
    text::{
        builtin::BuiltinFont,
        engine::TextEngine,
        font::{CaptionFont, FontFace, OutlineFace},
    },
};

/// Straight-alpha RGBA of the caption backdrop.
pub const PANEL_RGBA: [u8; 4] = [24, 24, 22, 128];
/// Straight-alpha RGBA of caption text.
pub const TEXT_RGBA: [u8; 4] = [255, 255, 255, 255];

/// Colors and padding of a caption block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionStyle {
    pub panel: [u8; 4],
    pub text: [u8; 4],
    pub padding: PanelPadding,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            panel: PANEL_RGBA,
            text: TEXT_RGBA,
            padding: PanelPadding::DEFAULT,
        }
    }
}

/// Draw the backdrop panel and the wrapped lines of `layout` onto `canvas`.
///
/// Returns `Ok(false)` without touching the canvas when the layout has no lines.
pub fn draw_caption(
    canvas: &mut RgbaImage,
    layout: &TextLayout,
    font: &CaptionFont,
    engine: &mut TextEngine,
    style: &CaptionStyle,
) -> ComposeResult<bool> {
    let Some(geometry) =
        PanelGeometry::around(layout, canvas.width(), canvas.height(), style.padding)
    else {
        return Ok(false);
    };
    let (w, h) = surface_size(canvas.width(), canvas.height())?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(color_to_cpu(style.panel));
    ctx.fill_rect(&rect_to_cpu(geometry.panel));

    ctx.set_paint(color_to_cpu(style.text));
    match &font.face {
        FontFace::Outline(face) => {
            draw_outline_lines(&mut ctx, engine, face, font.size_px, layout, &geometry)?
        }
        FontFace::Builtin(bitmap) => draw_bitmap_lines(&mut ctx, bitmap, layout, &geometry),
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    let dst: &mut [u8] = canvas;
    over_straight_in_place(dst, pixmap.data_as_u8_slice())?;
    Ok(true)
}

fn draw_outline_lines(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextEngine,
    face: &OutlineFace,
    size_px: f32,
    layout: &TextLayout,
    geometry: &PanelGeometry,
) -> ComposeResult<()> {
    let glyph_font = engine.glyph_font(face);
    for (text, origin) in layout.lines.iter().zip(&geometry.line_origins) {
        let shaped = engine.layout_line(face, size_px, text)?;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in shaped.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&glyph_font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

fn draw_bitmap_lines(
    ctx: &mut vello_cpu::RenderContext,
    bitmap: &BuiltinFont,
    layout: &TextLayout,
    geometry: &PanelGeometry,
) {
    let ascent = f64::from(bitmap.ascent());
    for (text, origin) in layout.lines.iter().zip(&geometry.line_origins) {
        for rect in bitmap.glyph_rects(text, origin.x, origin.y + ascent) {
            ctx.fill_rect(&rect_to_cpu(rect));
        }
    }
}

fn surface_size(width: u32, height: u32) -> ComposeResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ComposeError::render("canvas width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ComposeError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn color_to_cpu([r, g, b, a]: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
