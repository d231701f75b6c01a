//! Ordered set of telemetry channels advanced once per tick
//! Location: src/telemetry/bank.rs

use super::channel::{Channel, Quantity, Reading};
use super::noise::{GaussianNoise, NoiseSource};
use super::signal::SignalError;
use crate::config::PanelConfig;
use crate::utils::time::{SystemTimeProvider, TimeProvider};
use serde::Serialize;

/// Every channel's reading after one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSnapshot {
    /// Tick number, starting at 0
    pub sequence: u64,
    /// Clock reading when the tick ran
    pub timestamp_micros: u64,
    /// Readings in channel order
    pub readings: Vec<Reading>,
}

impl TickSnapshot {
    /// Reading by channel label
    pub fn reading(&self, label: &str) -> Option<&Reading> {
        self.readings.iter().find(|reading| reading.label == label)
    }

    /// Reading for one rail and quantity
    pub fn rail_reading(&self, rail: &str, quantity: Quantity) -> Option<&Reading> {
        self.readings
            .iter()
            .find(|reading| reading.rail == rail && reading.quantity == quantity)
    }
}

/// Channels stepped in a fixed enumeration order from one shared noise source.
///
/// Channels never read each other's state; the shared source only decides which
/// draw each channel receives.
pub struct TelemetryBank {
    channels: Vec<Channel>,
    noise: Box<dyn NoiseSource + Send>,
    clock: Box<dyn TimeProvider>,
    decimals: usize,
    sequence: u64,
}

impl TelemetryBank {
    /// Build the bank described by the configuration.
    ///
    /// All voltage channels come first in rail order, then all current channels.
    pub fn from_config(config: &PanelConfig) -> Result<Self, SignalError> {
        let mut channels = Vec::with_capacity(config.channel_count());

        for rail in &config.rails {
            channels.push(Channel::from_spec(&rail.name, Quantity::Voltage, &rail.voltage)?);
        }
        for rail in &config.rails {
            channels.push(Channel::from_spec(&rail.name, Quantity::Current, &rail.current)?);
        }

        tracing::debug!(channels = channels.len(), seed = ?config.telemetry.seed, "telemetry bank created");

        Ok(Self::new(channels)
            .with_decimals(config.telemetry.display_decimals)
            .with_noise(GaussianNoise::from_seed_option(config.telemetry.seed)))
    }

    /// Bank over explicit channels, drawing entropy-seeded Gaussian noise
    pub fn new(channels: Vec<Channel>) -> Self {
        Self {
            channels,
            noise: Box::new(GaussianNoise::from_entropy()),
            clock: Box::new(SystemTimeProvider),
            decimals: crate::config::constants::telemetry::DISPLAY_DECIMALS,
            sequence: 0,
        }
    }

    /// Replace the noise source
    pub fn with_noise<N: NoiseSource + Send + 'static>(mut self, noise: N) -> Self {
        self.noise = Box::new(noise);
        self
    }

    /// Replace the timestamp clock
    pub fn with_clock<C: TimeProvider + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Decimals used for reading text
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Advance every channel once, in enumeration order
    pub fn tick(&mut self) -> TickSnapshot {
        let noise = &mut self.noise;
        let decimals = self.decimals;
        let readings: Vec<Reading> = self
            .channels
            .iter_mut()
            .map(|channel| channel.step(noise, decimals))
            .collect();

        let snapshot = TickSnapshot {
            sequence: self.sequence,
            timestamp_micros: self.clock.now_micros(),
            readings,
        };
        self.sequence += 1;

        tracing::debug!(sequence = snapshot.sequence, channels = snapshot.readings.len(), "telemetry tick");
        snapshot
    }

    /// Current readings without stepping
    pub fn latest(&self) -> Vec<Reading> {
        self.channels
            .iter()
            .map(|channel| channel.reading(self.decimals))
            .collect()
    }

    /// Channels in enumeration order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Channel by label
    pub fn channel(&self, label: &str) -> Option<&Channel> {
        self.channels.iter().find(|channel| channel.label() == label)
    }

    /// Mutable channel by label
    pub fn channel_mut(&mut self, label: &str) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|channel| channel.label() == label)
    }

    /// Voltage or current channel of a rail
    pub fn rail_channel(&self, rail: &str, quantity: Quantity) -> Option<&Channel> {
        self.channels
            .iter()
            .find(|channel| channel.rail() == rail && channel.quantity() == quantity)
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the bank has no channels
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Ticks completed so far
    pub fn ticks(&self) -> u64 {
        self.sequence
    }

    /// Decimals used for reading text
    pub fn decimals(&self) -> usize {
        self.decimals
    }
}

impl std::fmt::Debug for TelemetryBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryBank")
            .field("channels", &self.channels)
            .field("decimals", &self.decimals)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}
