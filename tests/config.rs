use std::fs;
use std::time::Duration;

use assert_matches::assert_matches;

use champ_picker::config::{ConfigLoader, DEFAULT_BASE_URL};
use champ_picker::error::PickerError;

#[test]
fn file_overrides_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("champ-picker.json");
    fs::write(
        &path,
        r#"{
            "base_url": "http://localhost:8080/",
            "locale": "ko_KR",
            "tiles_per_row": 6,
            "timeout_secs": 5,
            "cache_dir": "/tmp/champ-cache"
        }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.base_url, "http://localhost:8080");
    assert_eq!(resolved.locale.as_str(), "ko_KR");
    assert_eq!(resolved.tiles_per_row, 6);
    assert_eq!(resolved.timeout, Duration::from_secs(5));
    assert_eq!(resolved.cache_dir.unwrap().as_str(), "/tmp/champ-cache");
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("partial.json");
    fs::write(&path, r#"{"locale": "fr_FR"}"#).unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    assert_eq!(resolved.locale.as_str(), "fr_FR");
    assert_eq!(resolved.tiles_per_row, 10);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("missing.json");
    assert_matches!(
        ConfigLoader::resolve(path.to_str()),
        Err(PickerError::ConfigRead(_))
    );
}

#[test]
fn invalid_json_is_a_parse_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert_matches!(
        ConfigLoader::resolve(path.to_str()),
        Err(PickerError::ConfigParse(_))
    );
}

#[test]
fn invalid_locale_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("locale.json");
    fs::write(&path, r#"{"locale": "english"}"#).unwrap();
    assert_matches!(
        ConfigLoader::resolve(path.to_str()),
        Err(PickerError::InvalidLocale(_))
    );
}
