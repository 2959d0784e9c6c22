use kurbo::{Point, Rect};

use crate::layout::wrap::TextLayout;

/// Space between the text block and the panel edges, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPadding {
    /// Left and right padding.
    pub x: f32,
    /// Top and bottom padding.
    pub y: f32,
}

impl PanelPadding {
    pub const DEFAULT: Self = Self { x: 30.0, y: 20.0 };
}

impl Default for PanelPadding {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where a wrapped caption lands on an image.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelGeometry {
    /// Backdrop rectangle behind the text.
    pub panel: Rect,
    /// Bounding box of the text block itself.
    pub text_block: Rect,
    /// Top-left corner of each line's box, in layout order.
    pub line_origins: Vec<Point>,
}

impl PanelGeometry {
    /// Center `layout` on a `image_w` x `image_h` image. `None` for an empty layout.
    ///
    /// The text block is centered both ways; each line is centered horizontally on its own
    /// width. The panel grows the widest-line box by `padding` on every side, so it always
    /// contains the text block. Coordinates can go negative when the text outgrows the image.
    pub fn around(
        layout: &TextLayout,
        image_w: u32,
        image_h: u32,
        padding: PanelPadding,
    ) -> Option<Self> {
        if layout.is_empty() {
            return None;
        }
        let (w, h) = (f64::from(image_w), f64::from(image_h));
        let block_w = f64::from(layout.max_line_width);
        let block_h = f64::from(layout.total_height);
        let top = (h - block_h) / 2.0;
        let left = (w - block_w) / 2.0;

        let text_block = Rect::new(left, top, left + block_w, top + block_h);
        let (px, py) = (f64::from(padding.x.max(0.0)), f64::from(padding.y.max(0.0)));
        let panel = text_block.inflate(px, py);

        let advance = f64::from(layout.line_advance());
        let line_origins = layout
            .line_widths
            .iter()
            .enumerate()
            .map(|(i, lw)| Point::new((w - f64::from(*lw)) / 2.0, top + i as f64 * advance))
            .collect();

        Some(Self {
            panel,
            text_block,
            line_origins,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/panel.rs"]
mod tests;
