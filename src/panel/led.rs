//! Green LED control on the rover controller
//! Location: src/panel/led.rs

use crate::hal::DeviceHandle;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Commands understood by the controller's LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LedCommand {
    /// Solid green
    On,
    /// LED off
    Off,
    /// Blinking green
    Blink,
}

impl LedCommand {
    /// Every command, in button order
    pub const ALL: [LedCommand; 3] = [LedCommand::On, LedCommand::Off, LedCommand::Blink];

    /// Newline-terminated text written to the link
    pub fn wire(&self) -> &'static str {
        match self {
            LedCommand::On => "green on\n",
            LedCommand::Off => "off\n",
            LedCommand::Blink => "green blink\n",
        }
    }

    /// Text shown in the LED status panel
    pub fn label(&self) -> &'static str {
        match self {
            LedCommand::On => "on",
            LedCommand::Off => "off",
            LedCommand::Blink => "blink",
        }
    }
}

impl fmt::Display for LedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LedCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" => Ok(LedCommand::On),
            "off" => Ok(LedCommand::Off),
            "blink" => Ok(LedCommand::Blink),
            other => Err(format!("unknown LED command '{}'", other)),
        }
    }
}

/// Last LED command issued from the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedState {
    label: String,
    last_command: Option<LedCommand>,
}

impl Default for LedState {
    fn default() -> Self {
        Self {
            label: LedCommand::Off.label().to_string(),
            last_command: None,
        }
    }
}

impl LedState {
    /// Current status label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Last command pressed, if any
    pub fn last_command(&self) -> Option<LedCommand> {
        self.last_command
    }

    /// Update the label without touching any device
    pub fn set(&mut self, command: LedCommand) {
        self.label = command.label().to_string();
        self.last_command = Some(command);
    }

    /// Send the command when a device is attached and update the label.
    ///
    /// The label follows the button press whether or not the write succeeds.
    /// Returns the controller's reply line, if any.
    pub fn apply(&mut self, command: LedCommand, device: Option<&mut DeviceHandle>) -> Option<String> {
        let response = match device {
            Some(device) => match device.send(command.wire()) {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(device = device.name(), command = %command, error = %e, "LED command not delivered");
                    None
                }
            },
            None => {
                tracing::debug!(command = %command, "no device attached, LED command not sent");
                None
            }
        };

        self.set(command);
        response
    }
}
