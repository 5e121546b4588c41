use bill_reminder::config::{ConfigManager, EngineConfig};
use bill_reminder::engine::Cadence;
use bill_reminder::errors::ConfigError;
use tempfile::TempDir;

#[test]
fn missing_config_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(dir.path().join("config.json"));
    assert_eq!(manager.load().unwrap(), EngineConfig::default());
}

#[test]
fn saved_config_reloads_with_custom_cadence() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().join("nested")).unwrap();

    let mut config = EngineConfig::default();
    config
        .cadences
        .insert("twoWeeksBefore", Cadence::lead("2 Weeks Before + Due Day", 14));
    config.default_cadence = "twoWeeksBefore".into();
    config.ui_color_enabled = false;
    manager.save(&config).unwrap();

    assert!(manager.config_path().exists());
    assert!(!manager.config_path().with_extension("json.tmp").exists());
    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn invalid_config_is_never_written() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(dir.path().join("config.json"));
    let config = EngineConfig {
        default_cadence: "everyFullMoon".into(),
        ..EngineConfig::default()
    };
    assert!(matches!(manager.save(&config), Err(ConfigError::Invalid(_))));
    assert!(!manager.config_path().exists());
}

#[test]
fn corrupt_config_reports_serde_error() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(dir.path().join("config.json"));
    std::fs::write(manager.config_path(), "{ not json").unwrap();
    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}
