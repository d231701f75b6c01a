// src/hal/types.rs
//! Core types for the device link

use serde::Serialize;
use thiserror::Error;

/// Errors raised by a command link
#[derive(Debug, Error)]
pub enum LinkError {
    /// Port could not be opened
    #[error("Failed to open port {port}: {reason}")]
    OpenFailed {
        /// Port that was requested
        port: String,
        /// Driver message
        reason: String,
    },

    /// No port to fall back to
    #[error("No serial port available")]
    NoPortAvailable,

    /// The OS could not list serial ports
    #[error("Failed to enumerate serial ports: {0}")]
    Enumerate(String),

    /// Blank commands are never written
    #[error("Command must not be empty")]
    EmptyCommand,

    /// The handle was released
    #[error("Device handle is closed")]
    Closed,

    /// Write or read failure
    #[error("Serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Traffic counters for one link
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LinkStats {
    /// Commands written
    pub commands_sent: u64,
    /// Bytes written
    pub bytes_written: u64,
    /// Non-empty reply lines read
    pub responses_received: u64,
    /// Commands that failed
    pub failures: u64,
}

impl LinkStats {
    pub(crate) fn record_sent(&mut self, bytes: usize) {
        self.commands_sent += 1;
        self.bytes_written += bytes as u64;
    }

    pub(crate) fn record_response(&mut self, response: &Option<String>) {
        if response.is_some() {
            self.responses_received += 1;
        }
    }

    pub(crate) fn record_failure(&mut self) {
        self.failures += 1;
    }
}
