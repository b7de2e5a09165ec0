use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use techsuite::error::TechSuiteError;
use techsuite::ui::dashboard::{resolve_resource_root, Stylesheet, ThemeManager, THEMES};
use tempfile::TempDir;

fn shipped_resources() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
}

#[test]
fn test_shipped_themes_parse() {
    let manager = ThemeManager::new(&shipped_resources());
    for (name, _) in THEMES {
        assert!(manager.load_theme(name).is_ok(), "theme {} failed to load", name);
    }
}

#[test]
fn test_apply_and_switch_shipped_themes() {
    let mut manager = ThemeManager::new(&shipped_resources());
    let shared = manager.stylesheet();

    manager.apply("hacker_dark").unwrap();
    assert_eq!(shared.read().background, Color::Black);

    manager.apply("hacker_light").unwrap();
    assert_eq!(shared.read().background, Color::White);
    assert_eq!(manager.current_theme(), Some("hacker_light"));
}

#[test]
fn test_unknown_theme_keeps_current() {
    let mut manager = ThemeManager::new(&shipped_resources());
    manager.apply("hacker_dark").unwrap();
    let before = manager.stylesheet().read().clone();

    let err = manager.apply("matrix").unwrap_err();
    assert!(matches!(err, TechSuiteError::UnknownTheme(name) if name == "matrix"));
    assert_eq!(manager.current_theme(), Some("hacker_dark"));
    assert_eq!(*manager.stylesheet().read(), before);
}

#[test]
fn test_missing_resource_root_keeps_builtin() {
    let dir = TempDir::new().unwrap();
    let mut manager = ThemeManager::new(dir.path());

    assert!(manager.apply("hacker_dark").is_err());
    assert_eq!(manager.current_theme(), None);
    assert_eq!(*manager.stylesheet().read(), Stylesheet::default());
}

#[test]
fn test_bad_colour_rejected_without_side_effects() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("themes")).unwrap();
    fs::write(
        dir.path().join("themes").join("hacker_light.json"),
        r#"{"background": "plaid"}"#,
    )
    .unwrap();

    let mut manager = ThemeManager::new(dir.path());
    assert!(matches!(
        manager.apply("hacker_light").unwrap_err(),
        TechSuiteError::Stylesheet(_)
    ));
    assert_eq!(manager.current_theme(), None);
}

#[test]
fn test_resource_root_override_wins() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        resolve_resource_root(Some(dir.path().to_path_buf())),
        dir.path()
    );
}
