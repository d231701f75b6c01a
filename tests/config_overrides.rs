// tests/config_overrides.rs
//! Layered configuration: files, environment overrides and export

use rover_panel::config::{ConfigError, ConfigLoader, PanelConfig};
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn clear_overrides() {
    for (key, _) in std::env::vars() {
        if key.starts_with("ROVER_PANEL__") {
            std::env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn test_environment_overrides_file_values() {
    clear_overrides();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[telemetry]\ntick_interval_ms = 500\nseed = 1").unwrap();

    std::env::set_var("ROVER_PANEL__TELEMETRY__TICK_INTERVAL_MS", "250");
    std::env::set_var("ROVER_PANEL__LINK__PORT_NAME", "/dev/ttyUSB3");
    std::env::set_var("ROVER_PANEL__LINK__ENABLED", "true");

    let result = ConfigLoader::with_paths(vec![file.path().to_path_buf()]).load();
    clear_overrides();

    let config = result.unwrap();
    assert_eq!(config.telemetry.tick_interval_ms, 250);
    assert_eq!(config.telemetry.seed, Some(1));
    assert!(config.link.enabled);
    assert_eq!(config.link.port_name.as_deref(), Some("/dev/ttyUSB3"));
}

#[test]
#[serial]
fn test_invalid_override_is_rejected() {
    clear_overrides();
    std::env::set_var("ROVER_PANEL__TELEMETRY__TICK_INTERVAL_MS", "0");

    let result = ConfigLoader::with_paths(vec![]).load();
    clear_overrides();

    match result {
        Err(ConfigError::ValidationError(errors)) => {
            assert!(errors.iter().any(|e| e.contains("tick_interval_ms")));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_numeric_port_name_override() {
    clear_overrides();
    std::env::set_var("ROVER_PANEL__LINK__PORT_NAME", "3");

    let result = ConfigLoader::with_paths(vec![]).load();
    clear_overrides();

    assert_eq!(result.unwrap().link.port_name.as_deref(), Some("3"));
}

#[test]
#[serial]
fn test_overrides_can_be_disabled() {
    clear_overrides();
    std::env::set_var("ROVER_PANEL__TELEMETRY__SEED", "42");

    let config = ConfigLoader::with_paths(vec![]).without_env_overrides().load();
    clear_overrides();

    assert_eq!(config.unwrap().telemetry.seed, None);
}

#[test]
fn test_export_round_trips_through_loader() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exported.toml");

    let mut loader = ConfigLoader::with_paths(vec![]).without_env_overrides();
    loader.load().unwrap();
    loader.export_config(&path).unwrap();

    let reloaded = ConfigLoader::with_paths(vec![path])
        .without_env_overrides()
        .load()
        .unwrap();
    assert_eq!(reloaded, PanelConfig::default());
}

#[test]
fn test_malformed_file_reports_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[telemetry\ntick_interval_ms = ").unwrap();

    let result = ConfigLoader::with_paths(vec![file.path().to_path_buf()])
        .without_env_overrides()
        .load();

    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}
