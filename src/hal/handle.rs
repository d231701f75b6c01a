// src/hal/handle.rs
//! Scoped ownership of the rover device link

use crate::config::LinkConfig;
use crate::hal::serial_driver::SerialLink;
use crate::hal::traits::CommandLink;
use crate::hal::types::LinkError;

/// Owns the open link; released on `close` or drop
pub struct DeviceHandle {
    name: String,
    link: Option<Box<dyn CommandLink>>,
}

impl DeviceHandle {
    /// Acquire the serial link described by the configuration
    pub fn open(config: &LinkConfig) -> Result<Self, LinkError> {
        let link = SerialLink::open(config)?;
        Ok(Self::from_link(Box::new(link)))
    }

    /// Take ownership of an already open link
    pub fn from_link(link: Box<dyn CommandLink>) -> Self {
        let name = link.name().to_string();
        tracing::info!(device = %name, "device handle acquired");
        Self {
            name,
            link: Some(link),
        }
    }

    /// Name of the underlying link
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the link is still held
    pub fn is_open(&self) -> bool {
        self.link.is_some()
    }

    /// Send one command; fails with `LinkError::Closed` after release
    pub fn send(&mut self, command: &str) -> Result<Option<String>, LinkError> {
        let link = self.link.as_mut().ok_or(LinkError::Closed)?;
        link.send_command(command)
    }

    /// Release the link; later sends fail with `LinkError::Closed`
    pub fn close(&mut self) {
        if self.link.take().is_some() {
            tracing::info!(device = %self.name, "device handle released");
        }
    }
}

impl Drop for DeviceHandle {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::MockLink;

    #[test]
    fn test_handle_forwards_commands() {
        let mock = MockLink::new("mock0");
        let mut handle = DeviceHandle::from_link(Box::new(mock.clone()));

        assert_eq!(handle.name(), "mock0");
        handle.send("green blink\n").unwrap();
        assert_eq!(mock.sent(), vec!["green blink\n"]);
    }

    #[test]
    fn test_closed_handle_rejects_commands() {
        let mock = MockLink::new("mock0");
        let mut handle = DeviceHandle::from_link(Box::new(mock.clone()));

        handle.close();
        assert!(!handle.is_open());
        assert!(matches!(handle.send("off\n"), Err(LinkError::Closed)));
        assert!(mock.sent().is_empty());

        // closing twice is harmless
        handle.close();
    }
}
