//! Common utilities shared across the panel core

pub mod time;

pub use time::{current_timestamp_micros, MockTimeProvider, SystemTimeProvider, TimeProvider};
