// src/hal/traits.rs
//! Command link abstraction for the rover controller

use crate::hal::types::LinkError;

/// Line-oriented text command channel to the rover's microcontroller
pub trait CommandLink: Send {
    /// Write one command and return the reply line, if the peer sent one
    fn send_command(&mut self, command: &str) -> Result<Option<String>, LinkError>;

    /// Human-readable endpoint name (port path, mock label, ...)
    fn name(&self) -> &str;
}

impl<L: CommandLink + ?Sized> CommandLink for Box<L> {
    fn send_command(&mut self, command: &str) -> Result<Option<String>, LinkError> {
        (**self).send_command(command)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
