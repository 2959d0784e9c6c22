use super::*;

const DEJAVU: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn dejavu() -> Option<OutlineFace> {
    let data = std::fs::read(DEJAVU).ok()?;
    Some(OutlineFace::new(data, 0, None, DEJAVU.to_string()))
}

#[test]
fn garbage_bytes_register_no_family() {
    let mut engine = TextEngine::new();
    let face = OutlineFace::new(b"nope".to_vec(), 0, None, "inline".into());
    assert!(engine.family_for(&face).is_err());
    assert!(engine.covers(&face, 16.0, "Hg").is_err());
}

#[test]
fn builtin_measure_matches_bitmap_metrics() {
    let mut engine = TextEngine::new();
    let font = CaptionFont::builtin(16.0);
    let mut m = FontMeasure::new(&mut engine, &font).unwrap();
    assert_eq!(m.text_width("ab"), 24.0);
    assert_eq!(m.line_extent(), 16.0);
}

#[test]
fn layout_rejects_bad_size() {
    let Some(face) = dejavu() else {
        return;
    };
    let mut engine = TextEngine::new();
    assert!(engine.layout_line(&face, 0.0, "x").is_err());
    assert!(engine.layout_line(&face, f32::NAN, "x").is_err());
}

#[test]
fn outline_font_measures_and_checks_coverage_when_installed() {
    let Some(face) = dejavu() else {
        return;
    };
    let mut engine = TextEngine::new();
    assert!(engine.covers(&face, 32.0, "Hg").unwrap());
    assert!(!engine.covers(&face, 32.0, "漢").unwrap());

    let family = engine.family_for(&face).unwrap();
    assert_eq!(engine.family_for(&face).unwrap(), family);

    let font = CaptionFont {
        size_px: 32.0,
        face: FontFace::Outline(face),
    };
    let mut m = FontMeasure::new(&mut engine, &font).unwrap();
    let short = m.text_width("Hi");
    let long = m.text_width("Hi there, friend");
    assert!(short > 0.0);
    assert!(long > short);
    assert!(m.line_extent() > 0.0);
}
