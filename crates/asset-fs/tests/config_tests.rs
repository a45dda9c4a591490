use asset_fs::{ConfigStore, Error, Format, NormalizedPath};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    dirs: Vec<String>,
    delete_missing: bool,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("asset-sync.toml");
    fs::write(&file_path, "dirs = [\"public/images\"]\ndelete_missing = true\n").unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(config.dirs, vec!["public/images".to_string()]);
    assert!(config.delete_missing);
}

#[test]
fn test_load_json_and_yaml() {
    let temp = TempDir::new().unwrap();
    let json_path = temp.path().join("config.json");
    let yaml_path = temp.path().join("config.yml");
    fs::write(&json_path, r#"{"dirs": ["a"], "delete_missing": false}"#).unwrap();
    fs::write(&yaml_path, "dirs:\n  - a\ndelete_missing: false\n").unwrap();

    let store = ConfigStore::new();
    let from_json: TestConfig = store.load(&NormalizedPath::new(&json_path)).unwrap();
    let from_yaml: TestConfig = store.load(&NormalizedPath::new(&yaml_path)).unwrap();

    assert_eq!(from_json, from_yaml);
}

#[test]
fn test_save_then_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("asset-sync.toml"));
    let config = TestConfig {
        dirs: vec!["app/assets/images".into()],
        delete_missing: false,
    };

    let store = ConfigStore::new();
    store.save(&path, &config).unwrap();
    let loaded: TestConfig = store.load(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_load_or_default_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("absent.toml"));

    let config: TestConfig = ConfigStore::new().load_or_default(&path).unwrap();
    assert_eq!(config, TestConfig::default());
}

#[test]
fn test_parse_error_names_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("broken.toml");
    fs::write(&file_path, "dirs = [").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&NormalizedPath::new(&file_path));
    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}

#[test]
fn test_unsupported_extension() {
    let path = NormalizedPath::new("config.ini");
    assert!(matches!(
        Format::detect(&path),
        Err(Error::UnsupportedFormat { extension }) if extension == "ini"
    ));
}
