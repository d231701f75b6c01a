//! Named telemetry channels bound to a power rail
//! Location: src/telemetry/channel.rs

use super::noise::NoiseSource;
use super::signal::{format_reading, SignalError, SignalState};
use crate::config::ChannelSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical quantity a channel reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Volts
    Voltage,
    /// Milliamps
    Current,
}

impl Quantity {
    /// Display unit used by the power table
    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::Voltage => "V",
            Quantity::Current => "mA",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Voltage => write!(f, "voltage"),
            Quantity::Current => write!(f, "current"),
        }
    }
}

/// One monitored measurement, exclusively owning its signal state
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    label: String,
    rail: String,
    quantity: Quantity,
    state: SignalState,
}

impl Channel {
    /// Channel labelled `<rail> <quantity>`
    pub fn new(rail: impl Into<String>, quantity: Quantity, state: SignalState) -> Self {
        let rail = rail.into();
        Self {
            label: format!("{} {}", rail, quantity),
            rail,
            quantity,
            state,
        }
    }

    /// Build a channel from its configured seed values
    pub fn from_spec(rail: &str, quantity: Quantity, spec: &ChannelSpec) -> Result<Self, SignalError> {
        let state = SignalState::with_gains(
            spec.current_value,
            spec.ideal_value,
            spec.std_dev,
            spec.alpha,
            spec.beta,
        )?;
        Ok(Self::new(rail, quantity, state))
    }

    /// Display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Rail name
    pub fn rail(&self) -> &str {
        &self.rail
    }

    /// Measured quantity
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Display unit
    pub fn unit(&self) -> &'static str {
        self.quantity.unit()
    }

    /// Signal state
    pub fn state(&self) -> &SignalState {
        &self.state
    }

    /// Mutable signal state
    pub fn state_mut(&mut self) -> &mut SignalState {
        &mut self.state
    }

    /// Current reading
    pub fn value(&self) -> f64 {
        self.state.current_value()
    }

    /// Advance the underlying signal and return a reading for display
    pub fn step<N: NoiseSource + ?Sized>(&mut self, noise: &mut N, decimals: usize) -> Reading {
        let value = self.state.step_with(noise);
        tracing::trace!(channel = %self.label, value, "channel stepped");
        self.reading(decimals)
    }

    /// Latest value without stepping
    pub fn reading(&self, decimals: usize) -> Reading {
        let value = self.state.current_value();
        Reading {
            label: self.label.clone(),
            rail: self.rail.clone(),
            quantity: self.quantity,
            value,
            text: format_reading(value, decimals),
        }
    }
}

/// Display-ready value of one channel at one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Channel label
    pub label: String,
    /// Rail name
    pub rail: String,
    /// Measured quantity
    pub quantity: Quantity,
    /// Raw value
    pub value: f64,
    /// Value formatted for display
    pub text: String,
}
