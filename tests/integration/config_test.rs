use serde_json::json;
use techsuite::core::config::Config;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.app.name, "Tech Suite");
    assert_eq!(config.ui.theme, "hacker_dark");
    assert_eq!(config.monitoring.cpu_ms, 1000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_load_missing_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.ui.theme = "hacker_light".to_string();
    config.monitoring.disk_ms = 7000;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{"ui": {"theme": "hacker_light"}}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.ui.theme, "hacker_light");
    assert_eq!(config.ui.frame_ms, 50);
    assert_eq!(config.monitoring, Default::default());
}

#[test]
fn test_config_corrupt_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn test_config_whitespace_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "  \n").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_dotted_lookup() {
    let config = Config::default();
    assert_eq!(config.get("ui.theme"), Some(json!("hacker_dark")));
    assert_eq!(config.get("ui.window.min_width"), Some(json!(80)));
    assert_eq!(config.get("ui.missing"), None);
    assert_eq!(config.get("nope.nothing"), None);
}
