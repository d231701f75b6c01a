//! Smoothly drifting synthetic signal
//! Location: src/telemetry/signal.rs
//!
//! Each step combines three terms on top of the previous reading:
//!
//! - a trend pulling the value back toward the setpoint (`alpha`)
//! - a momentum term carrying part of the previous change forward (`beta`)
//! - one fresh Gaussian draw scaled by `std_dev`
//!
//! Nothing is clamped. For `0 < alpha < 2` and a small `beta` the recurrence is
//! a damped system around the setpoint; other gains are accepted as-is.

use super::noise::{GaussianNoise, NoiseSource, ThreadRngNoise};
use crate::config::constants::telemetry::{DEFAULT_ALPHA, DEFAULT_BETA, DISPLAY_DECIMALS};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised while constructing a signal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// Standard deviation is negative, infinite or NaN
    #[error("standard deviation must be finite and >= 0, got {0}")]
    InvalidStdDev(f64),
}

/// State of one simulated analog channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalState {
    current_value: f64,
    ideal_value: f64,
    std_dev: f64,
    alpha: f64,
    beta: f64,
    last_delta: f64,
}

impl SignalState {
    /// Create a signal with the default regression and momentum gains
    pub fn new(current_value: f64, ideal_value: f64, std_dev: f64) -> Result<Self, SignalError> {
        Self::with_gains(current_value, ideal_value, std_dev, DEFAULT_ALPHA, DEFAULT_BETA)
    }

    /// Create a signal with explicit gains.
    ///
    /// Only the standard deviation is validated; any `alpha`/`beta` pair is
    /// accepted, however unstable.
    pub fn with_gains(
        current_value: f64,
        ideal_value: f64,
        std_dev: f64,
        alpha: f64,
        beta: f64,
    ) -> Result<Self, SignalError> {
        if !(std_dev >= 0.0) || !std_dev.is_finite() {
            return Err(SignalError::InvalidStdDev(std_dev));
        }

        Ok(Self {
            current_value,
            ideal_value,
            std_dev,
            alpha,
            beta,
            last_delta: ideal_value - current_value,
        })
    }

    /// Advance one step using the thread-local RNG and return the new reading
    pub fn step(&mut self) -> f64 {
        self.step_with(&mut ThreadRngNoise)
    }

    /// Advance one step drawing the perturbation from `noise`
    pub fn step_with<N: NoiseSource + ?Sized>(&mut self, noise: &mut N) -> f64 {
        let draw = noise.sample(self.std_dev);
        self.advance(draw)
    }

    /// Deterministic core of a step for an already drawn perturbation.
    ///
    /// Both mutable fields are committed together after the new value is
    /// computed.
    pub fn advance(&mut self, noise: f64) -> f64 {
        let trend = self.alpha * (self.ideal_value - self.current_value);
        let derivative_effect = self.beta * self.last_delta;
        let new_value = self.current_value + trend + derivative_effect + noise;
        let new_delta = new_value - self.current_value;

        self.current_value = new_value;
        self.last_delta = new_delta;

        tracing::trace!(
            value = new_value,
            delta = new_delta,
            trend,
            derivative_effect,
            noise,
            "signal stepped"
        );

        new_value
    }

    /// Overwrite the carried-over delta
    pub fn set_last_delta(&mut self, delta: f64) {
        self.last_delta = delta;
    }

    /// Last emitted reading
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Setpoint
    pub fn ideal_value(&self) -> f64 {
        self.ideal_value
    }

    /// Noise spread
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Regression gain
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Momentum gain
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Change applied by the previous step
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Current reading formatted for display
    pub fn display(&self) -> String {
        format_reading(self.current_value, DISPLAY_DECIMALS)
    }
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", DISPLAY_DECIMALS, self.current_value)
    }
}

/// Render a reading with a fixed number of decimals
pub fn format_reading(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Step a signal a fixed number of times from a seeded source, collecting every reading
pub fn simulate(state: &mut SignalState, steps: usize, seed: u64) -> Vec<f64> {
    let mut noise = GaussianNoise::seeded(seed);
    (0..steps).map(|_| state.step_with(&mut noise)).collect()
}
