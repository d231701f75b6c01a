// src/hal/mod.rs
//! Hardware abstraction for the rover command link

pub mod traits;
pub mod types;
pub mod serial_driver;
pub mod mock;
pub mod handle;

pub use traits::*;
pub use types::*;
pub use serial_driver::SerialLink;
pub use mock::MockLink;
pub use handle::DeviceHandle;
