//! Status group boxes: battery, motor and LED
//! Location: src/panel/status.rs

use super::led::LedState;
use serde::Serialize;
use std::fmt;

/// The closed set of status panel variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusKind {
    /// Battery pack
    Battery,
    /// Drive motor
    Motor,
    /// Controller LED
    Led,
}

impl StatusKind {
    /// Group box title
    pub fn title(&self) -> &'static str {
        match self {
            StatusKind::Battery => "Battery Status",
            StatusKind::Motor => "Motor Status",
            StatusKind::Led => "LED Status",
        }
    }

    /// Ordered (label, value) pairs shown in the group box
    pub fn fields(&self, led: &LedState) -> Vec<StatusField> {
        match self {
            StatusKind::Battery => vec![
                StatusField::new("Battery Status", "Charging"),
                StatusField::new("Voltage", "12.5V"),
                StatusField::new("Current", "0.5A"),
                StatusField::new("Temperature", "25°C"),
            ],
            StatusKind::Motor => vec![
                StatusField::new("Motor Status", "Running"),
                StatusField::new("Speed", "1000 RPM"),
                StatusField::new("Torque", "10 Nm"),
                StatusField::new("Temperature", "45°C"),
            ],
            StatusKind::Led => vec![StatusField::new("LED Status", led.label())],
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One label/value row of a status panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusField {
    /// Row label
    pub label: String,
    /// Row value
    pub value: String,
}

impl StatusField {
    /// Row from a label and value
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// An open status panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPanel {
    /// Selector-assigned id
    pub id: u32,
    /// Which variant is shown
    pub kind: StatusKind,
}

impl StatusPanel {
    /// Rows of this panel
    pub fn fields(&self, led: &LedState) -> Vec<StatusField> {
        self.kind.fields(led)
    }

    /// Titled text block
    pub fn render(&self, led: &LedState) -> String {
        render_panel(self.kind.title(), &self.kind.fields(led))
    }
}

/// Generic renderer shared by every variant
pub fn render_panel(title: &str, fields: &[StatusField]) -> String {
    let width = fields.iter().map(|field| field.label.chars().count()).max().unwrap_or(0);

    let mut out = format!("[{}]\n", title);
    for field in fields {
        out.push_str(&format!("  {:<width$}  {}\n", field.label, field.value, width = width));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::led::LedCommand;

    #[test]
    fn test_battery_fields() {
        let fields = StatusKind::Battery.fields(&LedState::default());
        let pairs: Vec<(&str, &str)> = fields.iter().map(|f| (f.label.as_str(), f.value.as_str())).collect();

        assert_eq!(
            pairs,
            vec![
                ("Battery Status", "Charging"),
                ("Voltage", "12.5V"),
                ("Current", "0.5A"),
                ("Temperature", "25°C"),
            ]
        );
    }

    #[test]
    fn test_led_panel_follows_led_state() {
        let mut led = LedState::default();
        assert_eq!(StatusKind::Led.fields(&led)[0].value, "off");

        led.set(LedCommand::Blink);
        assert_eq!(StatusKind::Led.fields(&led)[0].value, "blink");
    }

    #[test]
    fn test_render_panel_aligns_labels() {
        let panel = StatusPanel { id: 1, kind: StatusKind::Motor };
        let text = panel.render(&LedState::default());

        assert!(text.starts_with("[Motor Status]\n"));
        assert!(text.contains("  Speed         1000 RPM\n"));
        assert_eq!(text.lines().count(), 5);
    }
}
