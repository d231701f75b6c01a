//! Power rail on/off status labels
//! Location: src/panel/power.rs

use crate::config::constants::rails::UNKNOWN_STATUS;
use crate::config::PanelConfig;
use crate::error::{PanelError, Result};
use serde::Serialize;
use std::fmt;

/// Text shown in a rail's status column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RailStatus {
    /// No command yet
    #[default]
    Unknown,
    /// Switched on
    On,
    /// Switched off
    Off,
}

impl RailStatus {
    /// Label text
    pub fn as_str(&self) -> &'static str {
        match self {
            RailStatus::Unknown => UNKNOWN_STATUS,
            RailStatus::On => "ON",
            RailStatus::Off => "OFF",
        }
    }
}

impl From<bool> for RailStatus {
    fn from(on: bool) -> Self {
        if on {
            RailStatus::On
        } else {
            RailStatus::Off
        }
    }
}

impl fmt::Display for RailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the power table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerRail {
    /// Rail name
    pub name: String,
    /// Loads powered by the rail
    pub description: String,
    /// Status label
    pub status: RailStatus,
}

/// Rails in table order. Switching only changes the label; no hardware is driven.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerBoard {
    rails: Vec<PowerRail>,
}

impl PowerBoard {
    /// Every configured rail with status `--`
    pub fn from_config(config: &PanelConfig) -> Self {
        Self {
            rails: config
                .rails
                .iter()
                .map(|spec| PowerRail {
                    name: spec.name.clone(),
                    description: spec.description.clone(),
                    status: RailStatus::Unknown,
                })
                .collect(),
        }
    }

    /// Rails in table order
    pub fn rails(&self) -> &[PowerRail] {
        &self.rails
    }

    /// Status of a rail by name
    pub fn status(&self, rail: &str) -> Option<RailStatus> {
        self.rails.iter().find(|r| r.name == rail).map(|r| r.status)
    }

    /// Set a rail's label to ON or OFF
    pub fn switch(&mut self, rail: &str, on: bool) -> Result<RailStatus> {
        let entry = self
            .rails
            .iter_mut()
            .find(|r| r.name == rail)
            .ok_or_else(|| PanelError::UnknownRail(rail.to_string()))?;

        entry.status = RailStatus::from(on);
        tracing::info!(rail, status = %entry.status, "power rail switched");
        Ok(entry.status)
    }
}
