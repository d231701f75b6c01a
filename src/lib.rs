//! Rover panel core: headless ground-control state for a planetary rover
//!
//! The crate models the operator panel of a rover ground station without any
//! windowing toolkit:
//!
//! - Synthetic voltage and current telemetry for six power rails
//! - A periodic tick driver (feature `desktop`)
//! - Power-rail, status-panel, LED and emergency-stop state
//! - A scoped serial command link to the rover controller
//! - Layered TOML and environment configuration
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rover_panel::config::PanelConfig;
//! use rover_panel::panel::{ControlPanel, LedCommand, PanelEvent};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut panel = ControlPanel::new(&PanelConfig::default())?;
//!
//!     for _ in 0..3 {
//!         panel.handle(PanelEvent::Tick)?;
//!     }
//!     panel.handle(PanelEvent::SelectStatus(3))?;
//!     panel.handle(PanelEvent::Led(LedCommand::Blink))?;
//!
//!     println!("{}", panel.render_power_table());
//!     println!("{}", panel.render_status_panels());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod hal;
pub mod panel;
pub mod telemetry;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{ConfigLoader, PanelConfig};
pub use error::{PanelError, Result};
pub use hal::{CommandLink, DeviceHandle, LinkError};
pub use panel::{ControlPanel, EmergencyAction, LedCommand, PanelEvent, PanelOutcome};
pub use telemetry::{SignalError, SignalState, TelemetryBank, TickSnapshot};
pub use utils::time::{current_timestamp_micros, TimeProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    let mut features = vec![
        "Synthetic power-rail telemetry".to_string(),
        "Panel state machine".to_string(),
        "Serial command link".to_string(),
        "Layered configuration".to_string(),
    ];
    if cfg!(feature = "desktop") {
        features.push("Periodic tick driver".to_string());
    }

    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Headless ground-control panel core for a planetary rover".to_string(),
        features,
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}
