//! Synthetic power-rail telemetry
//!
//! Every monitored rail gets a voltage and a current channel. Each channel is a
//! [`SignalState`] that drifts toward its setpoint with momentum and Gaussian
//! noise. A [`TelemetryBank`] advances all channels once per tick, and (with
//! the `desktop` feature) a [`TelemetryDriver`] supplies the ticks.

pub mod signal;
pub mod noise;
pub mod channel;
pub mod bank;
#[cfg(feature = "desktop")]
pub mod driver;

pub use signal::{format_reading, simulate, SignalError, SignalState};
pub use noise::{FixedNoise, GaussianNoise, NoiseSource, ScriptedNoise, ThreadRngNoise};
pub use channel::{Channel, Quantity, Reading};
pub use bank::{TelemetryBank, TickSnapshot};
#[cfg(feature = "desktop")]
pub use driver::{DisplaySink, FnSink, TelemetryDriver, Tickable};
