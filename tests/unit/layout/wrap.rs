use super::*;

/// Every char is 10px wide; the reference extent is 20px.
struct Mono;

impl TextMeasure for Mono {
    fn text_width(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * 10.0
    }

    fn line_extent(&mut self) -> f32 {
        20.0
    }
}

#[test]
fn empty_and_blank_text_have_no_lines() {
    for text in ["", "   ", "\n\t"] {
        let l = layout(text, &mut Mono, 100.0);
        assert!(l.is_empty());
        assert_eq!(l.total_height, 0.0);
        assert_eq!(l.max_line_width, 0.0);
    }
}

#[test]
fn words_fill_greedily() {
    let l = layout("aa bb cc dd", &mut Mono, 50.0);
    assert_eq!(l.strategy, WrapStrategy::WordWrap);
    assert_eq!(l.lines, vec!["aa bb", "cc dd"]);
    assert_eq!(l.line_widths, vec![50.0, 50.0]);
    assert_eq!(l.max_line_width, 50.0);
}

#[test]
fn whitespace_runs_collapse_in_word_mode() {
    let l = layout("  hello \n  world  ", &mut Mono, 1000.0);
    assert_eq!(l.lines, vec!["hello world"]);
}

#[test]
fn overlong_word_sits_alone() {
    let l = layout("a abcdefghij b", &mut Mono, 30.0);
    assert_eq!(l.lines, vec!["a", "abcdefghij", "b"]);
    assert_eq!(l.max_line_width, 100.0);
}

#[test]
fn cjk_text_wraps_per_character() {
    let l = layout("迷ったらコレ", &mut Mono, 30.0);
    assert_eq!(l.strategy, WrapStrategy::CharWrap);
    assert_eq!(l.lines, vec!["迷った", "らコレ"]);
}

#[test]
fn char_wrap_drops_leading_and_trailing_spaces() {
    let l = layout("漢字 かな  abc", &mut Mono, 30.0);
    assert_eq!(l.lines, vec!["漢字", "かな", "abc"]);
    for line in &l.lines {
        assert_eq!(line.trim(), line);
    }
}

#[test]
fn geometry_uses_fixed_pitch() {
    let l = layout("aa bb cc", &mut Mono, 20.0);
    assert_eq!(l.lines.len(), 3);
    assert_eq!(l.line_height, 20.0);
    assert!((l.line_spacing - 8.0).abs() < 1e-4);
    assert!((l.line_advance() - 28.0).abs() < 1e-4);
    assert!((l.total_height - (3.0 * 20.0 + 2.0 * 8.0)).abs() < 1e-4);
}

#[test]
fn single_line_has_no_spacing_in_total() {
    let l = layout("hi", &mut Mono, 100.0);
    assert_eq!(l.total_height, 20.0);
}

#[test]
fn no_width_limit_breaks_every_token() {
    let lines = wrap("a b c", WrapStrategy::WordWrap, &mut Mono, 0.0);
    assert_eq!(lines, vec!["a", "b", "c"]);
}
