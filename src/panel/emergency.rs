//! Emergency stop buttons
//! Location: src/panel/emergency.rs

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Buttons of the emergency stop group, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EmergencyAction {
    /// Stop the rover
    Stop,
    /// Cut everything except the 3.3V, 5V and 19V rails
    TurnOffPartially,
    /// Cut the main bus
    TurnOffMainBus,
    /// Resume
    Go,
}

impl EmergencyAction {
    /// Every button, top to bottom
    pub const ALL: [EmergencyAction; 4] = [
        EmergencyAction::Stop,
        EmergencyAction::TurnOffPartially,
        EmergencyAction::TurnOffMainBus,
        EmergencyAction::Go,
    ];

    /// Text on the button
    pub fn button_label(&self) -> &'static str {
        match self {
            EmergencyAction::Stop => "STOP",
            EmergencyAction::TurnOffPartially => "Turn off everything except 3.3V, 5V, 19V",
            EmergencyAction::TurnOffMainBus => "Turn off the Main Bus",
            EmergencyAction::Go => "GO",
        }
    }

    /// Log line written when the button is pressed
    pub fn message(&self) -> &'static str {
        match self {
            EmergencyAction::Stop => "Stop pressed",
            EmergencyAction::TurnOffPartially => "turn off everything except 19v, 3.3v, 5v",
            EmergencyAction::TurnOffMainBus => "turn off the main bus",
            EmergencyAction::Go => "Go pressed",
        }
    }

    /// Record the press. No rail or bus is touched.
    pub fn trigger(self) -> Self {
        match self {
            EmergencyAction::Go => tracing::info!(action = %self, "{}", self.message()),
            _ => tracing::warn!(action = %self, "{}", self.message()),
        }
        self
    }
}

impl fmt::Display for EmergencyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.button_label())
    }
}

impl FromStr for EmergencyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "stop" => Ok(EmergencyAction::Stop),
            "partial" | "turn-off-partially" => Ok(EmergencyAction::TurnOffPartially),
            "main-bus" | "turn-off-main-bus" => Ok(EmergencyAction::TurnOffMainBus),
            "go" => Ok(EmergencyAction::Go),
            other => Err(format!("unknown emergency action '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_order_and_labels() {
        let labels: Vec<&str> = EmergencyAction::ALL.iter().map(|a| a.button_label()).collect();
        assert_eq!(labels[0], "STOP");
        assert_eq!(labels[3], "GO");
    }

    #[test]
    fn test_parse_action() {
        assert_eq!("main_bus".parse::<EmergencyAction>().unwrap(), EmergencyAction::TurnOffMainBus);
        assert_eq!("GO".parse::<EmergencyAction>().unwrap(), EmergencyAction::Go);
        assert!("halt".parse::<EmergencyAction>().is_err());
    }

    #[test]
    fn test_trigger_returns_action() {
        assert_eq!(EmergencyAction::Stop.trigger(), EmergencyAction::Stop);
    }
}
