// src/config/mod.rs
//! Panel configuration: telemetry timing, device link and power-rail seeds

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::{ConfigError, ConfigLoader};

use serde::{Deserialize, Serialize};

/// Complete panel configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PanelConfig {
    /// Tick timing and display
    #[serde(default)]
    pub telemetry: TelemetrySettings,

    /// Device link
    #[serde(default)]
    pub link: LinkConfig,

    /// Power rails in table order
    #[serde(default = "defaults::rails")]
    pub rails: Vec<RailSpec>,
}

/// Periodic driver and display settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TelemetrySettings {
    /// Timer period in milliseconds
    #[serde(default = "defaults::tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Fixed RNG seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Decimals shown for each reading
    #[serde(default = "defaults::display_decimals")]
    pub display_decimals: usize,
}

/// Serial command link settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LinkConfig {
    /// Open the device link at startup
    #[serde(default = "defaults::link_enabled")]
    pub enabled: bool,

    /// Port to open; the first enumerated port when absent
    #[serde(default)]
    pub port_name: Option<String>,

    /// Serial speed
    #[serde(default = "defaults::baud_rate")]
    pub baud_rate: u32,

    /// Read timeout in milliseconds
    #[serde(default = "defaults::timeout_ms")]
    pub timeout_ms: u64,

    /// Wait between a command and its reply, in milliseconds
    #[serde(default = "defaults::response_delay_ms")]
    pub response_delay_ms: u64,
}

/// One row of the power supply table
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RailSpec {
    /// Rail name, e.g. `12V`
    pub name: String,

    /// Loads powered by the rail
    #[serde(default)]
    pub description: String,

    /// Operating voltage in V
    pub voltage: ChannelSpec,

    /// Operating current in mA
    pub current: ChannelSpec,
}

/// Seed values for one synthetic channel
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct ChannelSpec {
    /// Starting reading
    pub current_value: f64,
    /// Setpoint the reading drifts toward
    pub ideal_value: f64,
    /// Spread of the per-step noise
    pub std_dev: f64,

    /// Regression gain
    #[serde(default = "defaults::alpha")]
    pub alpha: f64,

    /// Momentum gain
    #[serde(default = "defaults::beta")]
    pub beta: f64,
}

impl ChannelSpec {
    /// Seed with default gains
    pub fn new(current_value: f64, ideal_value: f64, std_dev: f64) -> Self {
        Self {
            current_value,
            ideal_value,
            std_dev,
            alpha: defaults::alpha(),
            beta: defaults::beta(),
        }
    }
}

/// Default value providers using constants
mod defaults {
    use super::{ChannelSpec, RailSpec};
    use crate::config::constants::*;

    pub fn tick_interval_ms() -> u64 { telemetry::DEFAULT_TICK_INTERVAL_MS }
    pub fn display_decimals() -> usize { telemetry::DISPLAY_DECIMALS }
    pub fn alpha() -> f64 { telemetry::DEFAULT_ALPHA }
    pub fn beta() -> f64 { telemetry::DEFAULT_BETA }

    pub fn link_enabled() -> bool { false }
    pub fn baud_rate() -> u32 { link::DEFAULT_BAUD_RATE }
    pub fn timeout_ms() -> u64 { link::DEFAULT_TIMEOUT_MS }
    pub fn response_delay_ms() -> u64 { link::DEFAULT_RESPONSE_DELAY_MS }

    pub fn rails() -> Vec<RailSpec> {
        rails::DEFAULT_RAILS
            .iter()
            .map(|seed| RailSpec {
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                voltage: ChannelSpec::new(seed.voltage.0, seed.voltage.1, seed.voltage.2),
                current: ChannelSpec::new(seed.current_ma.0, seed.current_ma.1, seed.current_ma.2),
            })
            .collect()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: defaults::tick_interval_ms(),
            seed: None,
            display_decimals: defaults::display_decimals(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::link_enabled(),
            port_name: None,
            baud_rate: defaults::baud_rate(),
            timeout_ms: defaults::timeout_ms(),
            response_delay_ms: defaults::response_delay_ms(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            telemetry: TelemetrySettings::default(),
            link: LinkConfig::default(),
            rails: defaults::rails(),
        }
    }
}

impl PanelConfig {
    /// Collect every configuration problem instead of stopping at the first
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let interval = self.telemetry.tick_interval_ms;
        if !(telemetry::MIN_TICK_INTERVAL_MS..=telemetry::MAX_TICK_INTERVAL_MS).contains(&interval) {
            errors.push(format!(
                "telemetry.tick_interval_ms {} is out of range [{}, {}]",
                interval,
                telemetry::MIN_TICK_INTERVAL_MS,
                telemetry::MAX_TICK_INTERVAL_MS
            ));
        }

        if self.telemetry.display_decimals > telemetry::MAX_DISPLAY_DECIMALS {
            errors.push(format!(
                "telemetry.display_decimals {} exceeds {}",
                self.telemetry.display_decimals,
                telemetry::MAX_DISPLAY_DECIMALS
            ));
        }

        if self.link.baud_rate == 0 || self.link.baud_rate > link::MAX_BAUD_RATE {
            errors.push(format!("link.baud_rate {} is invalid", self.link.baud_rate));
        }

        if self.link.timeout_ms == 0 {
            errors.push("link.timeout_ms must be greater than 0".to_string());
        }

        if matches!(&self.link.port_name, Some(name) if name.trim().is_empty()) {
            errors.push("link.port_name cannot be empty".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for rail in &self.rails {
            if rail.name.trim().is_empty() {
                errors.push("rail name cannot be empty".to_string());
            } else if !seen.insert(rail.name.as_str()) {
                errors.push(format!("duplicate rail '{}'", rail.name));
            }

            for (quantity, spec) in [("voltage", &rail.voltage), ("current", &rail.current)] {
                validate_channel(&rail.name, quantity, spec, &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Rail spec by display name
    pub fn rail(&self, name: &str) -> Option<&RailSpec> {
        self.rails.iter().find(|rail| rail.name == name)
    }

    /// Number of synthetic channels the configuration produces
    pub fn channel_count(&self) -> usize {
        self.rails.len() * 2
    }
}

fn validate_channel(rail: &str, quantity: &str, spec: &ChannelSpec, errors: &mut Vec<String>) {
    if !(spec.std_dev >= 0.0) || !spec.std_dev.is_finite() {
        errors.push(format!(
            "rail '{}' {} std_dev must be finite and >= 0, got {}",
            rail, quantity, spec.std_dev
        ));
    }

    for (field, value) in [
        ("current_value", spec.current_value),
        ("ideal_value", spec.ideal_value),
        ("alpha", spec.alpha),
        ("beta", spec.beta),
    ] {
        if !value.is_finite() {
            errors.push(format!("rail '{}' {} {} must be finite", rail, quantity, field));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = PanelConfig::default();
        assert_eq!(config.telemetry.tick_interval_ms, telemetry::DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(config.rails.len(), 6);
        assert_eq!(config.channel_count(), 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_rail_seeds() {
        let config = PanelConfig::default();
        let aux = config.rail("12V").unwrap();

        assert_eq!(aux.description, "AUX");
        assert_eq!(aux.voltage.current_value, 11.98);
        assert_eq!(aux.current.ideal_value, 1100.0);
        assert_eq!(aux.current.std_dev, 10.0);
        assert_eq!(aux.current.alpha, telemetry::DEFAULT_ALPHA);
    }

    #[test]
    fn test_config_serialization() {
        let config = PanelConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: PanelConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PanelConfig = toml::from_str(
            r#"
[telemetry]
tick_interval_ms = 250
"#,
        )
        .unwrap();

        assert_eq!(config.telemetry.tick_interval_ms, 250);
        assert_eq!(config.telemetry.display_decimals, 2);
        assert_eq!(config.link.baud_rate, 115_200);
        assert_eq!(config.rails.len(), 6);
    }

    #[test]
    fn test_config_validation_collects_errors() {
        let mut config = PanelConfig::default();
        config.telemetry.tick_interval_ms = 0;
        config.rails[0].voltage.std_dev = -1.0;
        config.rails[1].current.alpha = f64::INFINITY;
        config.rails[2].name = "3.3V".to_string();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4, "{:?}", errors);
    }

    #[test]
    fn test_infinite_std_dev_rejected() {
        let mut config = PanelConfig::default();
        config.rails[0].voltage.std_dev = f64::INFINITY;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("3.3V") && errors[0].contains("std_dev"), "{:?}", errors);
    }

    #[test]
    fn test_empty_port_name_rejected() {
        let mut config = PanelConfig::default();
        config.link.port_name = Some("  ".to_string());
        assert!(config.validate().is_err());
    }
}
