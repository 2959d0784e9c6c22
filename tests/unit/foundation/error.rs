use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ComposeError::asset_load(Path::new("bg/a.jpg"), "boom")
            .to_string()
            .contains("asset load error for 'bg/a.jpg'")
    );
    assert!(
        ComposeError::overlay_apply(Path::new("ov.png"), "x")
            .to_string()
            .contains("overlay apply error")
    );
    assert!(ComposeError::render("x").to_string().contains("render error:"));
    assert!(ComposeError::config("x").to_string().contains("config error:"));
    assert!(
        ComposeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        ComposeError::no_backgrounds("data/backgrounds")
            .to_string()
            .contains("data/backgrounds")
    );
}

#[test]
fn only_empty_background_set_is_batch_fatal() {
    assert!(ComposeError::no_backgrounds("d").is_batch_fatal());
    assert!(!ComposeError::asset_load(Path::new("a"), "x").is_batch_fatal());
    assert!(!ComposeError::render("x").is_batch_fatal());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ComposeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: ComposeError = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
    assert!(matches!(err, ComposeError::Serde(_)));
}
