// src/hal/serial_driver.rs
//! Serial command link to the rover controller
//!
//! Commands are plain UTF-8 text terminated by `\n` (for example `"green on\n"`).
//! After each write the link waits for the controller to answer, then reads a
//! single reply line.

use crate::config::constants::link::MAX_RESPONSE_LINE_BYTES;
use crate::config::LinkConfig;
use crate::hal::traits::CommandLink;
use crate::hal::types::{LinkError, LinkStats};
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

/// Serial link over any byte transport; a real port by default
pub struct SerialLink<T: Read + Write + Send = Box<dyn serialport::SerialPort>> {
    port_name: String,
    transport: T,
    response_delay: Duration,
    stats: LinkStats,
}

impl SerialLink {
    /// Open the configured port, or the first enumerated one when none is named
    pub fn open(config: &LinkConfig) -> Result<Self, LinkError> {
        match &config.port_name {
            Some(port_name) => Self::open_port(port_name, config),
            None => Self::first_available(config),
        }
    }

    /// Open the first port reported by the OS
    pub fn first_available(config: &LinkConfig) -> Result<Self, LinkError> {
        let ports = serialport::available_ports().map_err(enumeration_error)?;
        for port in &ports {
            tracing::debug!(port = %port.port_name, "serial port discovered");
        }

        let first = ports.first().ok_or(LinkError::NoPortAvailable)?;
        Self::open_port(&first.port_name, config)
    }

    /// Open a named port with the configured baud rate and timeout
    pub fn open_port(port_name: &str, config: &LinkConfig) -> Result<Self, LinkError> {
        let port = serialport::new(port_name, config.baud_rate)
            .timeout(Duration::from_millis(config.timeout_ms))
            .open()
            .map_err(|e| LinkError::OpenFailed {
                port: port_name.to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!(port = port_name, baud_rate = config.baud_rate, "serial port opened");

        Ok(Self::with_transport(
            port_name,
            port,
            Duration::from_millis(config.response_delay_ms),
        ))
    }
}

fn enumeration_error(err: serialport::Error) -> LinkError {
    LinkError::Enumerate(err.to_string())
}

impl<T: Read + Write + Send> SerialLink<T> {
    /// Wrap an already open transport
    pub fn with_transport(port_name: impl Into<String>, transport: T, response_delay: Duration) -> Self {
        Self {
            port_name: port_name.into(),
            transport,
            response_delay,
            stats: LinkStats::default(),
        }
    }

    /// Traffic counters
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Underlying byte transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn exchange(&mut self, command: &str) -> Result<Option<String>, LinkError> {
        if command.trim().is_empty() {
            return Err(LinkError::EmptyCommand);
        }

        self.transport.write_all(command.as_bytes())?;
        self.transport.flush()?;
        self.stats.record_sent(command.len());

        if !self.response_delay.is_zero() {
            std::thread::sleep(self.response_delay);
        }

        let response = self.read_line()?;
        self.stats.record_response(&response);
        Ok(response)
    }

    /// Read bytes up to `\n`, a timeout, or EOF, whichever comes first
    fn read_line(&mut self) -> Result<Option<String>, LinkError> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];

        while line.len() < MAX_RESPONSE_LINE_BYTES {
            match self.transport.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    if byte[0] == b'\n' {
                        break;
                    }
                    line.push(byte[0]);
                }
                Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if line.last() == Some(&b'\r') {
            line.pop();
        }

        if line.is_empty() {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&line).into_owned()))
        }
    }
}

impl<T: Read + Write + Send> CommandLink for SerialLink<T> {
    fn send_command(&mut self, command: &str) -> Result<Option<String>, LinkError> {
        let result = self.exchange(command);
        match &result {
            Ok(response) => {
                tracing::debug!(port = %self.port_name, command = command.trim_end(), ?response, "command sent");
            }
            Err(e) => {
                self.stats.record_failure();
                tracing::warn!(port = %self.port_name, command = command.trim_end(), error = %e, "command failed");
            }
        }
        result
    }

    fn name(&self) -> &str {
        &self.port_name
    }
}
