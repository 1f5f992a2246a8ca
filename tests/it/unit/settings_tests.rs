//! Unit tests for settings loading and saving.

use cropbox::{AspectRatioMode, Error, Settings};

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = Settings {
        min_width: 32,
        default_aspect: AspectRatioMode::R9_16,
        even_dimensions: false,
        output_dir: Some(dir.path().to_path_buf()),
        ..Settings::default()
    };
    settings.save_to(&path).unwrap();

    assert_eq!(Settings::load_from(&path).unwrap(), settings);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "handle_size": 16, "default_aspect": "Square" }"#).unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.handle_size, 16);
    assert_eq!(settings.default_aspect, AspectRatioMode::Square);
    assert_eq!(settings.min_width, 20);
    assert!(settings.even_dimensions);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Settings::load_from(&path), Err(Error::Settings(_))));
}

#[test]
fn test_constraints_raise_degenerate_minimum() {
    let settings = Settings {
        min_width: 0,
        min_height: -4,
        ..Settings::default()
    };
    let c = settings.constraints();
    assert_eq!((c.min_width, c.min_height), (1, 1));
    assert_eq!(c.aspect_ratio, None);
}

#[test]
fn snapshot_aspect_mode_names() {
    let modes = [
        AspectRatioMode::Free,
        AspectRatioMode::Original,
        AspectRatioMode::Square,
        AspectRatioMode::R16_9,
        AspectRatioMode::R9_16,
        AspectRatioMode::Custom,
    ];
    insta::assert_json_snapshot!(modes, @r#"
    [
      "Free",
      "Original",
      "Square",
      "R16_9",
      "R9_16",
      "Custom"
    ]
    "#);
}
