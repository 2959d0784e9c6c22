use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn defaults_match_documented_values() {
    let cfg = ComposeConfig::default();
    assert_eq!(cfg.font_size, 48.0);
    assert_eq!((cfg.canvas_width, cfg.canvas_height), (1200, 1200));
    assert_eq!(cfg.font_path.as_deref(), Some(Path::new(DEFAULT_FONT_PATH)));
    cfg.validate().unwrap();
}

#[test]
fn json_keeps_defaults_for_missing_keys() {
    let cfg: ComposeConfig =
        serde_json::from_str(r#"{ "font_size": 60, "canvas_width": 800 }"#).unwrap();
    assert_eq!(cfg.font_size, 60.0);
    assert_eq!(cfg.canvas_width, 800);
    assert_eq!(cfg.canvas_height, 1200);
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn env_overrides_apply() {
    let mut cfg = ComposeConfig::default();
    cfg.apply_env_from(env(&[
        ("FONT_SIZE", "32"),
        ("COMPOSED_WIDTH", "640"),
        ("COMPOSED_HEIGHT", "480"),
        ("BACKGROUND_DIR", "/tmp/bg"),
        ("COMPOSED_DIR", "/tmp/out"),
        ("FONT_PATH", ""),
    ]))
    .unwrap();
    assert_eq!(cfg.font_size, 32.0);
    assert_eq!((cfg.canvas_width, cfg.canvas_height), (640, 480));
    assert_eq!(cfg.background_dir, PathBuf::from("/tmp/bg"));
    assert_eq!(cfg.output_dir, PathBuf::from("/tmp/out"));
    assert_eq!(cfg.font_path, None);
}

#[test]
fn bad_env_value_is_config_error() {
    let mut cfg = ComposeConfig::default();
    let err = cfg
        .apply_env_from(env(&[("COMPOSED_WIDTH", "wide")]))
        .unwrap_err();
    assert!(matches!(err, ComposeError::Config(_)));
}

#[test]
fn validate_rejects_degenerate_values() {
    let cfg = ComposeConfig {
        canvas_width: 0,
        ..ComposeConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = ComposeConfig {
        font_size: f32::NAN,
        ..ComposeConfig::default()
    };
    assert!(cfg.validate().is_err());
}
