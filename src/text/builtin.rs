//! Built-in 5x7 bitmap font: the last link of the font fallback chain.
//!
//! It needs no font file, so a caption can always be measured and drawn. Printable ASCII has real
//! glyphs; every other visible character is drawn as a hollow box ("tofu") with a full-width
//! advance for wide (CJK, Hangul, fullwidth) characters.

use kurbo::Rect;

use crate::text::script::is_cjk_char;

/// Grid rows per em: 7 glyph rows plus one descent row.
const ROWS_PER_EM: f32 = 8.0;
const GLYPH_ROWS: u32 = 7;
const NARROW_ADVANCE: f32 = 6.0;
const WIDE_ADVANCE: f32 = 8.0;

/// Column bitmaps for U+0020..=U+007E, least significant bit is the top row.
const FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    Bitmap(&'static [u8; 5]),
    Blank,
    Tofu,
}

fn glyph_for(c: char) -> Glyph {
    match c {
        ' '..='~' => Glyph::Bitmap(&FONT_5X7[(c as usize) - 0x20]),
        c if c.is_whitespace() || c.is_control() => Glyph::Blank,
        _ => Glyph::Tofu,
    }
}

fn is_wide(c: char) -> bool {
    is_cjk_char(c)
        || matches!(
            c,
            '\u{1100}'..='\u{115F}'
                | '\u{2E80}'..='\u{303E}'
                | '\u{3400}'..='\u{4DBF}'
                | '\u{AC00}'..='\u{D7A3}'
                | '\u{F900}'..='\u{FAFF}'
                | '\u{FF01}'..='\u{FF60}'
                | '\u{FFE0}'..='\u{FFE6}'
        )
}

/// Built-in bitmap font scaled to a pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuiltinFont {
    size_px: f32,
}

impl BuiltinFont {
    pub fn new(size_px: f32) -> Self {
        Self { size_px }
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Side of one bitmap cell in pixels.
    pub fn cell_px(&self) -> f32 {
        self.size_px / ROWS_PER_EM
    }

    pub fn ascent(&self) -> f32 {
        GLYPH_ROWS as f32 * self.cell_px()
    }

    pub fn descent(&self) -> f32 {
        self.cell_px()
    }

    pub fn advance(&self, c: char) -> f32 {
        let cells = if c.is_control() && c != '\t' {
            0.0
        } else if is_wide(c) {
            WIDE_ADVANCE
        } else {
            NARROW_ADVANCE
        };
        cells * self.cell_px()
    }

    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.advance(c)).sum()
    }

    /// Filled rectangles drawing `text` with its pen starting at `x` on baseline `baseline_y`.
    pub fn glyph_rects(&self, text: &str, x: f64, baseline_y: f64) -> Vec<Rect> {
        let cell = f64::from(self.cell_px());
        let top = baseline_y - f64::from(GLYPH_ROWS) * cell;
        let mut out = Vec::new();
        let mut pen_x = x;
        for c in text.chars() {
            match glyph_for(c) {
                Glyph::Bitmap(columns) => {
                    for (col, bits) in columns.iter().enumerate() {
                        for row in 0..GLYPH_ROWS {
                            if bits & (1 << row) == 0 {
                                continue;
                            }
                            let x0 = pen_x + col as f64 * cell;
                            let y0 = top + f64::from(row) * cell;
                            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
                        }
                    }
                }
                Glyph::Tofu => {
                    let w = f64::from(self.advance(c)) - cell;
                    let h = f64::from(GLYPH_ROWS) * cell;
                    out.extend(hollow_box(pen_x, top, w, h, cell));
                }
                Glyph::Blank => {}
            }
            pen_x += f64::from(self.advance(c));
        }
        out
    }
}

fn hollow_box(x: f64, y: f64, w: f64, h: f64, stroke: f64) -> [Rect; 4] {
    [
        Rect::new(x, y, x + w, y + stroke),
        Rect::new(x, y + h - stroke, x + w, y + h),
        Rect::new(x, y + stroke, x + stroke, y + h - stroke),
        Rect::new(x + w - stroke, y + stroke, x + w, y + h - stroke),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/text/builtin.rs"]
mod tests;
