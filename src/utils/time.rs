//! Timestamp sources for telemetry snapshots

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Time provider trait for dependency injection and testing
pub trait TimeProvider: Send + Sync {
    /// Microseconds since the Unix epoch
    fn now_micros(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_micros(&self) -> u64 {
        current_timestamp_micros()
    }
}

/// Mock time provider for deterministic testing
#[derive(Debug, Default)]
pub struct MockTimeProvider {
    current_time: AtomicU64,
}

impl MockTimeProvider {
    /// Clock frozen at `initial_time_micros`
    pub fn new(initial_time_micros: u64) -> Self {
        Self {
            current_time: AtomicU64::new(initial_time_micros),
        }
    }

    /// Move the clock forward
    pub fn advance_by(&self, micros: u64) {
        self.current_time.fetch_add(micros, Ordering::Relaxed);
    }

    /// Jump to an absolute time
    pub fn set_time(&self, micros: u64) {
        self.current_time.store(micros, Ordering::Relaxed);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_micros(&self) -> u64 {
        self.current_time.load(Ordering::Relaxed)
    }
}

impl<P: TimeProvider + ?Sized> TimeProvider for std::sync::Arc<P> {
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }
}

/// Wall clock in microseconds since the Unix epoch
pub fn current_timestamp_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_time_provider() {
        let clock = MockTimeProvider::new(1_000);
        assert_eq!(clock.now_micros(), 1_000);

        clock.advance_by(500);
        assert_eq!(clock.now_micros(), 1_500);

        clock.set_time(42);
        assert_eq!(clock.now_micros(), 42);
    }

    #[test]
    fn test_system_time_is_after_epoch() {
        assert!(SystemTimeProvider.now_micros() > 0);
    }
}
