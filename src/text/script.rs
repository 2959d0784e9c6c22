/// True for Hiragana (U+3040–309F), Katakana (U+30A0–30FF) and CJK Unified Ideographs
/// (U+4E00–9FFF).
pub fn is_cjk_char(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FFF}')
}

/// True if any codepoint of `text` is CJK.
pub fn is_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

/// Line-breaking strategy for a caption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WrapStrategy {
    /// Greedy over whitespace-delimited tokens.
    WordWrap,
    /// Greedy over individual characters; CJK text has no reliable word boundaries.
    CharWrap,
}

impl WrapStrategy {
    /// `CharWrap` as soon as the text contains any CJK codepoint.
    pub fn for_text(text: &str) -> Self {
        if is_cjk(text) {
            Self::CharWrap
        } else {
            Self::WordWrap
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/script.rs"]
mod tests;
