// src/error.rs
//! Unified error type for the panel core
//!
//! Component errors (`SignalError`, `LinkError`, `ConfigError`) live next to the
//! code that raises them and convert into [`PanelError`] at the panel boundary.

use crate::config::ConfigError;
use crate::hal::LinkError;
use crate::telemetry::SignalError;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors surfaced by the control panel
#[derive(Debug, Error)]
pub enum PanelError {
    /// A channel could not be built
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    /// The device link failed
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No rail with that name
    #[error("Unknown power rail: {0}")]
    UnknownRail(String),

    /// No open status panel with that id
    #[error("No status panel with id {0}")]
    UnknownPanel(u32),
}

impl PanelError {
    /// Whether the panel can keep running after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            PanelError::Link(_) | PanelError::UnknownRail(_) | PanelError::UnknownPanel(_) => true,
            PanelError::Signal(_) | PanelError::Config(_) => false,
        }
    }
}
