use super::*;

#[test]
fn templates_cycle() {
    let caps = template_captions(HOOK_TEMPLATES.len() + 2);
    assert_eq!(caps[0], HOOK_TEMPLATES[0]);
    assert_eq!(caps[HOOK_TEMPLATES.len()], HOOK_TEMPLATES[0]);
    assert_eq!(caps[HOOK_TEMPLATES.len() + 1], HOOK_TEMPLATES[1]);
    assert!(template_captions(0).is_empty());
}

#[test]
fn templates_are_japanese_and_distinct() {
    use crate::text::script::is_cjk;
    assert_eq!(HOOK_TEMPLATES.len(), 50);
    assert!(HOOK_TEMPLATES.iter().all(|t| is_cjk(t)));
    let unique: std::collections::HashSet<_> = HOOK_TEMPLATES.iter().collect();
    assert_eq!(unique.len(), HOOK_TEMPLATES.len());
    assert_eq!(HOOK_TEMPLATES[0], "2025秋、周りと絶対被らない「モテスウェット」8選");
}

#[test]
fn saved_captions_use_timestamped_name() {
    let dir = std::env::temp_dir().join(format!(
        "postcraft_captions_save_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let caps = template_captions(3);
    let path = save_captions(&dir.join("hooks"), &caps).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    let stamp = name
        .strip_prefix("hooks_")
        .and_then(|n| n.strip_suffix("Z.json"))
        .unwrap();
    assert_eq!(stamp.len(), "20251018T120000".len());
    assert_eq!(stamp.as_bytes()[8], b'T');
    assert!(stamp.chars().filter(|c| *c != 'T').all(|c| c.is_ascii_digit()));
    assert_eq!(load_captions(&path).unwrap(), caps);
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn caption_file_round_trip_and_errors() {
    let dir = std::env::temp_dir().join(format!(
        "postcraft_captions_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("hooks.json");
    std::fs::write(&good, r#"["Hello world", "迷ったらコレ", ""]"#).unwrap();
    assert_eq!(
        load_captions(&good).unwrap(),
        vec!["Hello world", "迷ったらコレ", ""]
    );

    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"{"not": "an array"}"#).unwrap();
    assert!(matches!(
        load_captions(&bad),
        Err(crate::foundation::error::ComposeError::Serde(_))
    ));
    assert!(load_captions(&dir.join("missing.json")).is_err());
    std::fs::remove_dir_all(dir).ok();
}
