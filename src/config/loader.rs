// src/config/loader.rs
//! Layered configuration loader: defaults, TOML files, then environment overrides

use crate::config::{constants::paths, PanelConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File does not exist
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML could not be parsed or deserialized
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Every problem found by `PanelConfig::validate`
    #[error("Configuration validation errors: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    /// File could not be read or written
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Loads and merges panel configuration from well-known locations
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_overrides: bool,
    current_config: PanelConfig,
}

impl ConfigLoader {
    /// Loader over the standard search path
    pub fn new() -> Self {
        Self::with_paths(Self::discover_config_paths())
    }

    /// Loader over explicit paths, later paths taking precedence
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            env_overrides: true,
            current_config: PanelConfig::default(),
        }
    }

    /// Disable `ROVER_PANEL__*` environment overrides
    pub fn without_env_overrides(mut self) -> Self {
        self.env_overrides = false;
        self
    }

    /// Search path, lowest precedence first
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Load, merge and validate the configuration
    pub fn load(&mut self) -> Result<PanelConfig, ConfigError> {
        let config = self.load_and_merge_configs()?;
        tracing::debug!(
            rails = config.rails.len(),
            tick_interval_ms = config.telemetry.tick_interval_ms,
            "configuration loaded"
        );
        self.current_config = config.clone();
        Ok(config)
    }

    /// Last successfully loaded configuration
    pub fn current_config(&self) -> &PanelConfig {
        &self.current_config
    }

    /// Parse and validate a single file on its own
    pub fn validate_config_file<P: AsRef<Path>>(&self, path: P) -> Result<PanelConfig, ConfigError> {
        let value = self.load_config_file(path)?;
        let mut merged = Self::default_value()?;
        merge_toml_values(&mut merged, value);
        Self::finish(merged)
    }

    /// Write the current configuration as TOML
    pub fn export_config<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let toml_content = toml::to_string_pretty(&self.current_config)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, toml_content)?;
        Ok(())
    }

    fn load_and_merge_configs(&self) -> Result<PanelConfig, ConfigError> {
        let mut merged_config = Self::default_value()?;

        for config_path in &self.config_paths {
            match self.load_config_file(config_path) {
                Ok(file_config) => {
                    tracing::debug!(path = %config_path.display(), "merging configuration file");
                    merge_toml_values(&mut merged_config, file_config);
                }
                // Every location in the search path is optional
                Err(ConfigError::FileNotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        if self.env_overrides {
            apply_environment_overrides(&mut merged_config, std::env::vars());
        }

        Self::finish(merged_config)
    }

    fn default_value() -> Result<toml::Value, ConfigError> {
        toml::Value::try_from(PanelConfig::default()).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn finish(value: toml::Value) -> Result<PanelConfig, ConfigError> {
        let config: PanelConfig = value
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError(e.to_string()))?;

        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    fn load_config_file<P: AsRef<Path>>(&self, path: P) -> Result<toml::Value, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: toml::Value = toml::from_str(&content)?;

        Ok(config)
    }

    fn discover_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(paths::SYSTEM_CONFIG_PATH)];

        if let Some(home_dir) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
            paths.push(PathBuf::from(home_dir).join(paths::USER_CONFIG_DIR).join("config.toml"));
        }

        paths.push(PathBuf::from(paths::DEFAULT_CONFIG_FILE));
        paths.push(PathBuf::from(paths::LOCAL_CONFIG_FILE));

        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Tables merge key by key; any other value (arrays included) is replaced
fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml_values(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

/// `ROVER_PANEL__TELEMETRY__TICK_INTERVAL_MS=500` sets `telemetry.tick_interval_ms`
fn apply_environment_overrides<I>(config: &mut toml::Value, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        let Some(stripped) = key.strip_prefix(paths::ENV_PREFIX) else {
            continue;
        };

        let path: Vec<String> = stripped
            .split(paths::ENV_SEPARATOR)
            .map(|part| part.to_lowercase())
            .collect();

        if path.iter().any(|part| part.is_empty()) {
            tracing::warn!(variable = %key, "ignoring malformed configuration override");
            continue;
        }

        tracing::debug!(variable = %key, "applying configuration override");
        let typed = parse_env_value(&value);

        // Numeric-looking text (a port named `3`) stays a string when the
        // typed value would not deserialize but the string would
        if !typed.is_str() && !override_deserializes(config, &path, typed.clone()) {
            let text = toml::Value::String(value.clone());
            if override_deserializes(config, &path, text.clone()) {
                set_nested_value(config, &path, text);
                continue;
            }
        }

        set_nested_value(config, &path, typed);
    }
}

fn override_deserializes(config: &toml::Value, path: &[String], value: toml::Value) -> bool {
    let mut candidate = config.clone();
    set_nested_value(&mut candidate, path, value);
    let parsed: Result<PanelConfig, toml::de::Error> = candidate.try_into();
    parsed.is_ok()
}

fn parse_env_value(value: &str) -> toml::Value {
    if let Ok(int_val) = value.parse::<i64>() {
        toml::Value::Integer(int_val)
    } else if let Ok(float_val) = value.parse::<f64>() {
        toml::Value::Float(float_val)
    } else if let Ok(bool_val) = value.parse::<bool>() {
        toml::Value::Boolean(bool_val)
    } else {
        toml::Value::String(value.to_string())
    }
}

fn set_nested_value(config: &mut toml::Value, path: &[String], value: toml::Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = config;
    for part in parents {
        let toml::Value::Table(table) = current else {
            return;
        };
        current = table
            .entry(part.clone())
            .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
    }

    if let toml::Value::Table(table) = current {
        table.insert(last.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_config_loader_creation() {
        let loader = ConfigLoader::new();
        assert!(!loader.config_paths().is_empty());
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let mut loader = ConfigLoader::with_paths(vec![PathBuf::from("/nonexistent/rover.toml")])
            .without_env_overrides();

        let config = loader.load().unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn test_file_overrides_merge_with_defaults() {
        let file = write_config(
            r#"
[telemetry]
tick_interval_ms = 500
seed = 7

[link]
port_name = "/dev/ttyACM0"
"#,
        );

        let mut loader = ConfigLoader::with_paths(vec![file.path().to_path_buf()]).without_env_overrides();
        let config = loader.load().unwrap();

        assert_eq!(config.telemetry.tick_interval_ms, 500);
        assert_eq!(config.telemetry.seed, Some(7));
        assert_eq!(config.telemetry.display_decimals, 2);
        assert_eq!(config.link.port_name.as_deref(), Some("/dev/ttyACM0"));
        assert_eq!(config.link.baud_rate, 115_200);
        assert_eq!(config.rails.len(), 6);
        assert_eq!(loader.current_config(), &config);
    }

    #[test]
    fn test_later_files_take_precedence() {
        let first = write_config("[telemetry]\ntick_interval_ms = 500\n");
        let second = write_config("[telemetry]\ntick_interval_ms = 250\n");

        let mut loader = ConfigLoader::with_paths(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ])
        .without_env_overrides();

        assert_eq!(loader.load().unwrap().telemetry.tick_interval_ms, 250);
    }

    #[test]
    fn test_rails_array_replaces_defaults() {
        let file = write_config(
            r#"
[[rails]]
name = "48V"
description = "Drive"
voltage = { current_value = 47.5, ideal_value = 48.0, std_dev = 0.2 }
current = { current_value = 900.0, ideal_value = 1000.0, std_dev = 5.0, alpha = 0.3 }
"#,
        );

        let config = ConfigLoader::with_paths(vec![])
            .without_env_overrides()
            .validate_config_file(file.path())
            .unwrap();

        assert_eq!(config.rails.len(), 1);
        assert_eq!(config.rails[0].current.alpha, 0.3);
        assert_eq!(config.rails[0].current.beta, 0.1);
    }

    #[test]
    fn test_invalid_config_validation() {
        let file = write_config(
            r#"
[[rails]]
name = "5V"
voltage = { current_value = 4.9, ideal_value = 5.0, std_dev = -1.0 }
current = { current_value = 30.0, ideal_value = 30.0, std_dev = 0.1 }
"#,
        );

        let loader = ConfigLoader::with_paths(vec![]);
        let result = loader.validate_config_file(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(ref errors)) if errors.len() == 1));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let file = write_config("[telemetry\ntick_interval_ms = ");
        let loader = ConfigLoader::with_paths(vec![]);

        assert!(matches!(
            loader.validate_config_file(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_environment_override_parsing() {
        let mut value = toml::Value::try_from(PanelConfig::default()).unwrap();
        apply_environment_overrides(
            &mut value,
            vec![
                ("ROVER_PANEL__TELEMETRY__TICK_INTERVAL_MS".to_string(), "200".to_string()),
                ("ROVER_PANEL__LINK__ENABLED".to_string(), "true".to_string()),
                ("ROVER_PANEL__LINK__PORT_NAME".to_string(), "COM3".to_string()),
                ("ROVER_PANEL____BROKEN".to_string(), "1".to_string()),
                ("UNRELATED".to_string(), "x".to_string()),
            ],
        );

        let config: PanelConfig = value.try_into().unwrap();
        assert_eq!(config.telemetry.tick_interval_ms, 200);
        assert!(config.link.enabled);
        assert_eq!(config.link.port_name.as_deref(), Some("COM3"));
    }

    #[test]
    fn test_numeric_looking_port_name_stays_text() {
        let mut value = toml::Value::try_from(PanelConfig::default()).unwrap();
        apply_environment_overrides(
            &mut value,
            vec![
                ("ROVER_PANEL__LINK__PORT_NAME".to_string(), "3".to_string()),
                ("ROVER_PANEL__LINK__BAUD_RATE".to_string(), "9600".to_string()),
            ],
        );

        let config: PanelConfig = value.try_into().unwrap();
        assert_eq!(config.link.port_name.as_deref(), Some("3"));
        assert_eq!(config.link.baud_rate, 9600);
    }

    #[test]
    fn test_config_export() {
        let loader = ConfigLoader::with_paths(vec![]);
        let temp_file = NamedTempFile::new().unwrap();

        loader.export_config(temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("[telemetry]"));
        assert!(content.contains("[[rails]]"));

        let reloaded = loader.validate_config_file(temp_file.path()).unwrap();
        assert_eq!(&reloaded, loader.current_config());
    }
}
