use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use crate::kernel::config::{resolve_home, HostConfig};
use crate::kernel::error::Error;

#[test]
fn test_missing_config_uses_defaults() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = HostConfig::load(&temp_dir.path().join("config.toml")).unwrap();
    assert_eq!(config, HostConfig::default());
    assert_eq!(config.settings_file, "settings.properties");
    assert_eq!(config.log_level, "info");
    assert!(config.disabled_plugins.is_empty());
}

#[cfg(feature = "toml-config")]
#[test]
fn test_partial_toml_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "disabled_plugins = [\"core-languages\"]\nlog_level = \"debug\"\n").unwrap();

    let config = HostConfig::load(&path).unwrap();
    assert_eq!(config.disabled_plugins, vec!["core-languages"]);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.settings_file, "settings.properties");
}

#[test]
fn test_json_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "settings_file": "prefs/settings.json" }"#).unwrap();

    let config = HostConfig::load(&path).unwrap();
    assert_eq!(config.settings_file, "prefs/settings.json");
    assert_eq!(
        config.settings_path(temp_dir.path()),
        temp_dir.path().join("prefs/settings.json")
    );
}

#[test]
fn test_invalid_and_unsupported_configs() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let broken = temp_dir.path().join("config.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(HostConfig::load(&broken), Err(Error::Config(_))));

    let ini = temp_dir.path().join("config.ini");
    fs::write(&ini, "[host]").unwrap();
    assert!(matches!(HostConfig::load(&ini), Err(Error::Config(msg)) if msg.contains("Unsupported")));
}

#[test]
fn test_explicit_home_wins() {
    let explicit = PathBuf::from("/tmp/scribe-explicit-home");
    assert_eq!(resolve_home(Some(explicit.clone())).unwrap(), explicit);
}
