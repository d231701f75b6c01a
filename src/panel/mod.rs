// src/panel/mod.rs
//! Control panel state: telemetry, power rails, status panels, LED and
//! emergency buttons
//!
//! Every user interaction is a [`PanelEvent`] handed to [`ControlPanel::handle`],
//! so a window, a terminal front end or a test can drive the same state.

pub mod emergency;
pub mod led;
pub mod power;
pub mod selector;
pub mod status;

pub use emergency::EmergencyAction;
pub use led::{LedCommand, LedState};
pub use power::{PowerBoard, PowerRail, RailStatus};
pub use selector::{StatusSelector, SELECTOR_OPTIONS};
pub use status::{render_panel, StatusField, StatusKind, StatusPanel};

use crate::config::PanelConfig;
use crate::error::Result;
use crate::hal::DeviceHandle;
use crate::telemetry::{Quantity, Reading, TelemetryBank, TickSnapshot};

/// One user interaction or timer firing
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// Timer fired
    Tick,
    /// Drop-down entry chosen
    SelectStatus(usize),
    /// Close button of a status panel
    ClosePanel(u32),
    /// LED button pressed
    Led(LedCommand),
    /// ON or OFF button of a power rail
    SwitchRail {
        /// Rail name
        rail: String,
        /// `true` for ON
        on: bool,
    },
    /// Emergency stop button pressed
    Emergency(EmergencyAction),
}

/// What an event changed
#[derive(Debug, Clone, PartialEq)]
pub enum PanelOutcome {
    /// Every channel stepped
    Ticked(TickSnapshot),
    /// New status panel id
    PanelOpened(u32),
    /// The removed panel
    PanelClosed(StatusPanel),
    /// Placeholder selected
    NoChange,
    /// LED label after the command, with the controller's reply
    LedUpdated {
        /// New LED label
        label: String,
        /// Reply line from the controller
        response: Option<String>,
    },
    /// New status label of the rail
    RailSwitched {
        /// Rail name
        rail: String,
        /// New label
        status: RailStatus,
    },
    /// Press logged
    EmergencyRecorded(EmergencyAction),
}

/// Column headers of the power supply table
pub const POWER_TABLE_HEADERS: [&str; 5] = [
    "Voltage",
    "Specification",
    "Operation Voltage(V)",
    "Operation Current(mA)",
    "Status",
];

/// The whole panel
#[derive(Debug)]
pub struct ControlPanel {
    bank: TelemetryBank,
    board: PowerBoard,
    selector: StatusSelector,
    led: LedState,
    device: Option<DeviceHandle>,
    last_emergency: Option<EmergencyAction>,
}

impl ControlPanel {
    /// Panel over a freshly built telemetry bank
    pub fn new(config: &PanelConfig) -> Result<Self> {
        let bank = TelemetryBank::from_config(config)?;
        Ok(Self::with_bank(bank, config))
    }

    /// Use a prepared bank, e.g. one with scripted noise
    pub fn with_bank(bank: TelemetryBank, config: &PanelConfig) -> Self {
        Self {
            bank,
            board: PowerBoard::from_config(config),
            selector: StatusSelector::new(),
            led: LedState::default(),
            device: None,
            last_emergency: None,
        }
    }

    /// Attach a device at construction
    pub fn with_device(mut self, device: DeviceHandle) -> Self {
        self.attach_device(device);
        self
    }

    /// Attach or replace the device
    pub fn attach_device(&mut self, device: DeviceHandle) {
        tracing::info!(device = device.name(), "device attached to panel");
        self.device = Some(device);
    }

    /// Release the device link, if any
    pub fn detach_device(&mut self) -> Option<DeviceHandle> {
        self.device.take()
    }

    /// Apply one event
    pub fn handle(&mut self, event: PanelEvent) -> Result<PanelOutcome> {
        tracing::trace!(?event, "panel event");

        let outcome = match event {
            PanelEvent::Tick => PanelOutcome::Ticked(self.bank.tick()),
            PanelEvent::SelectStatus(index) => match self.selector.select(index) {
                Some(id) => PanelOutcome::PanelOpened(id),
                None => PanelOutcome::NoChange,
            },
            PanelEvent::ClosePanel(id) => PanelOutcome::PanelClosed(self.selector.close(id)?),
            PanelEvent::Led(command) => {
                let response = self.led.apply(command, self.device.as_mut());
                PanelOutcome::LedUpdated {
                    label: self.led.label().to_string(),
                    response,
                }
            }
            PanelEvent::SwitchRail { rail, on } => {
                let status = self.board.switch(&rail, on)?;
                PanelOutcome::RailSwitched { rail, status }
            }
            PanelEvent::Emergency(action) => {
                self.last_emergency = Some(action.trigger());
                PanelOutcome::EmergencyRecorded(action)
            }
        };

        Ok(outcome)
    }

    /// Telemetry channels
    pub fn bank(&self) -> &TelemetryBank {
        &self.bank
    }

    /// Mutable telemetry channels
    pub fn bank_mut(&mut self) -> &mut TelemetryBank {
        &mut self.bank
    }

    /// Power rail labels
    pub fn board(&self) -> &PowerBoard {
        &self.board
    }

    /// Status selector and open panels
    pub fn selector(&self) -> &StatusSelector {
        &self.selector
    }

    /// LED state
    pub fn led(&self) -> &LedState {
        &self.led
    }

    /// Attached device, if any
    pub fn device(&self) -> Option<&DeviceHandle> {
        self.device.as_ref()
    }

    /// Most recent emergency button
    pub fn last_emergency(&self) -> Option<EmergencyAction> {
        self.last_emergency
    }

    /// Power supply table with the latest readings
    pub fn render_power_table(&self) -> String {
        render_power_table(&self.board, &self.bank.latest())
    }

    /// Every open status panel, in insertion order
    pub fn render_status_panels(&self) -> String {
        self.selector
            .panels()
            .iter()
            .map(|panel| panel.render(&self.led))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Text table of rails, their readings and status labels
pub fn render_power_table(board: &PowerBoard, readings: &[Reading]) -> String {
    let mut rows: Vec<[String; 5]> = vec![POWER_TABLE_HEADERS.map(str::to_string)];

    for rail in board.rails() {
        let text = |quantity: Quantity| {
            readings
                .iter()
                .find(|reading| reading.rail == rail.name && reading.quantity == quantity)
                .map(|reading| reading.text.clone())
                .unwrap_or_default()
        };
        rows.push([
            rail.name.clone(),
            rail.description.clone(),
            text(Quantity::Voltage),
            text(Quantity::Current),
            rail.status.to_string(),
        ]);
    }

    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(feature = "desktop")]
impl crate::telemetry::Tickable for ControlPanel {
    fn tick(&mut self) -> TickSnapshot {
        self.bank.tick()
    }
}
