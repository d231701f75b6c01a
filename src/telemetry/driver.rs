//! Periodic tick driver for the telemetry bank
//! Location: src/telemetry/driver.rs

use super::bank::{TelemetryBank, TickSnapshot};
use crate::config::constants::telemetry::MIN_TICK_INTERVAL_MS;
use crate::config::TelemetrySettings;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

/// Consumer of per-tick snapshots (a display, a logger, a collector)
pub trait DisplaySink {
    /// Receive one snapshot, in tick order
    fn publish(&mut self, snapshot: &TickSnapshot);
}

impl DisplaySink for Vec<TickSnapshot> {
    fn publish(&mut self, snapshot: &TickSnapshot) {
        self.push(snapshot.clone());
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F: FnMut(&TickSnapshot)> DisplaySink for FnSink<F> {
    fn publish(&mut self, snapshot: &TickSnapshot) {
        (self.0)(snapshot)
    }
}

/// Anything the driver can advance once per tick
pub trait Tickable {
    /// Advance one tick and return the new readings
    fn tick(&mut self) -> TickSnapshot;
}

impl Tickable for TelemetryBank {
    fn tick(&mut self) -> TickSnapshot {
        TelemetryBank::tick(self)
    }
}

/// Sequential timer loop: one `tick` per interval, never overlapping
#[derive(Debug, Clone)]
pub struct TelemetryDriver {
    period: Duration,
    max_ticks: Option<u64>,
}

impl TelemetryDriver {
    /// Driver ticking every `period`. A zero period is raised to the minimum tick interval.
    pub fn new(period: Duration) -> Self {
        let min_period = Duration::from_millis(MIN_TICK_INTERVAL_MS);
        let period = if period < min_period {
            tracing::warn!(
                requested_ms = period.as_millis() as u64,
                min_ms = MIN_TICK_INTERVAL_MS,
                "tick period below minimum, clamping"
            );
            min_period
        } else {
            period
        };

        Self {
            period,
            max_ticks: None,
        }
    }

    /// Driver using the configured tick interval
    pub fn from_settings(settings: &TelemetrySettings) -> Self {
        Self::new(Duration::from_millis(settings.tick_interval_ms))
    }

    /// Stop on its own after `ticks` ticks
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    /// Effective tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run until the shutdown flag turns `true`, the sender is dropped, or the
    /// tick limit is reached. Returns the number of ticks run.
    pub async fn run<T, S>(&self, target: &mut T, sink: &mut S, mut shutdown: watch::Receiver<bool>) -> u64
    where
        T: Tickable + ?Sized,
        S: DisplaySink + ?Sized,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0u64;
        tracing::info!(period_ms = self.period.as_millis() as u64, max_ticks = ?self.max_ticks, "telemetry driver started");

        loop {
            if *shutdown.borrow() {
                break;
            }
            if matches!(self.max_ticks, Some(limit) if ticks >= limit) {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    let snapshot = target.tick();
                    sink.publish(&snapshot);
                    ticks += 1;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        tracing::debug!("shutdown sender dropped");
                        break;
                    }
                }
            }
        }

        tracing::info!(ticks, "telemetry driver stopped");
        ticks
    }
}

impl Default for TelemetryDriver {
    fn default() -> Self {
        Self::from_settings(&TelemetrySettings::default())
    }
}
