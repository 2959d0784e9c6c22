use crate::text::script::WrapStrategy;

/// Line pitch as a multiple of the reference extent; the gap between lines is the excess over 1.0.
pub const LINE_PITCH: f32 = 1.4;

/// Text measurement seam used by [`layout`].
pub trait TextMeasure {
    /// Advance width of `text` rendered on one line.
    fn text_width(&mut self, text: &str) -> f32;

    /// Ascent-to-descent extent of the reference text (`"Hg"`).
    fn line_extent(&mut self) -> f32;
}

/// Wrapped caption and the geometry of its text block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    /// Strategy chosen for the caption.
    pub strategy: WrapStrategy,
    /// Wrapped lines, top to bottom.
    pub lines: Vec<String>,
    /// Measured width of each line.
    pub line_widths: Vec<f32>,
    /// Height of one line of text.
    pub line_height: f32,
    /// Gap between consecutive lines.
    pub line_spacing: f32,
    /// `n * line_height + (n - 1) * line_spacing`.
    pub total_height: f32,
    /// Widest line.
    pub max_line_width: f32,
}

impl TextLayout {
    fn empty(strategy: WrapStrategy) -> Self {
        Self {
            strategy,
            lines: Vec::new(),
            line_widths: Vec::new(),
            line_height: 0.0,
            line_spacing: 0.0,
            total_height: 0.0,
            max_line_width: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Vertical distance between the tops of consecutive lines.
    pub fn line_advance(&self) -> f32 {
        self.line_height + self.line_spacing
    }
}

/// Wrap `text` to `max_width` and compute the block geometry.
///
/// Empty or whitespace-only text yields zero lines and zero height.
pub fn layout(text: &str, measure: &mut impl TextMeasure, max_width: f32) -> TextLayout {
    let strategy = WrapStrategy::for_text(text);
    let lines = wrap(text, strategy, measure, max_width);
    if lines.is_empty() {
        return TextLayout::empty(strategy);
    }

    let line_height = measure.line_extent();
    let line_spacing = line_height * (LINE_PITCH - 1.0);
    let line_widths: Vec<f32> = lines.iter().map(|l| measure.text_width(l)).collect();
    let max_line_width = line_widths.iter().copied().fold(0.0f32, f32::max);
    let n = lines.len() as f32;

    TextLayout {
        strategy,
        lines,
        line_widths,
        line_height,
        line_spacing,
        total_height: n * line_height + (n - 1.0) * line_spacing,
        max_line_width,
    }
}

/// Greedy line breaking with the given strategy.
pub fn wrap(
    text: &str,
    strategy: WrapStrategy,
    measure: &mut impl TextMeasure,
    max_width: f32,
) -> Vec<String> {
    let mut lines = LineFiller::new(measure, max_width);
    match strategy {
        WrapStrategy::WordWrap => {
            for token in text.split_whitespace() {
                lines.push(token, " ");
            }
        }
        WrapStrategy::CharWrap => {
            let mut buf = [0u8; 4];
            for c in text.chars() {
                if c.is_whitespace() {
                    lines.push_space();
                } else {
                    lines.push(c.encode_utf8(&mut buf), "");
                }
            }
        }
    }
    lines.finish()
}

struct LineFiller<'m, M> {
    measure: &'m mut M,
    max_width: f32,
    lines: Vec<String>,
    current: String,
}

impl<'m, M: TextMeasure> LineFiller<'m, M> {
    fn new(measure: &'m mut M, max_width: f32) -> Self {
        Self {
            measure,
            max_width,
            lines: Vec::new(),
            current: String::new(),
        }
    }

    fn fits(&mut self, candidate: &str) -> bool {
        self.measure.text_width(candidate) <= self.max_width
    }

    /// Append `unit`; an empty line always accepts it, even when it is too wide on its own.
    fn push(&mut self, unit: &str, sep: &str) {
        if self.current.is_empty() {
            self.current.push_str(unit);
            return;
        }
        let candidate = format!("{}{sep}{unit}", self.current);
        if self.fits(&candidate) {
            self.current = candidate;
        } else {
            self.break_line();
            self.current.push_str(unit);
        }
    }

    /// Whitespace never starts a line; one that overflows just ends the current line.
    fn push_space(&mut self) {
        if self.current.is_empty() || self.current.ends_with(' ') {
            return;
        }
        let candidate = format!("{} ", self.current);
        if self.fits(&candidate) {
            self.current = candidate;
        } else {
            self.break_line();
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        let line = line.trim_end();
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.break_line();
        self.lines
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
