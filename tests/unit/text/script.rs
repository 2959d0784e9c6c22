use super::*;

#[test]
fn latin_only_is_not_cjk() {
    assert!(!is_cjk("Hello world"));
    assert!(!is_cjk("Ça coûte 1 000 €"));
    assert!(!is_cjk(""));
    assert_eq!(WrapStrategy::for_text("Hello world"), WrapStrategy::WordWrap);
}

#[test]
fn each_script_block_is_cjk() {
    assert!(is_cjk("ひらがな"));
    assert!(is_cjk("カタカナ"));
    assert!(is_cjk("漢字"));
}

#[test]
fn mixed_text_picks_char_wrap() {
    assert!(is_cjk("2025秋 best hoodie"));
    assert_eq!(WrapStrategy::for_text("迷ったらコレ"), WrapStrategy::CharWrap);
}

#[test]
fn block_boundaries() {
    assert!(is_cjk_char('\u{3040}'));
    assert!(is_cjk_char('\u{30FF}'));
    assert!(is_cjk_char('\u{4E00}'));
    assert!(is_cjk_char('\u{9FFF}'));
    assert!(!is_cjk_char('\u{303F}'));
    assert!(!is_cjk_char('\u{A000}'));
    // Hangul and fullwidth forms are outside the classified ranges.
    assert!(!is_cjk_char('한'));
    assert!(!is_cjk_char('！'));
}
