//! Device capability traits
//!
//! These traits define the interface between the wake cycle and the
//! hardware-specific implementations. Each exposes named operations rather
//! than raw registers or driver calls, so tests can substitute mocks and
//! check the exact sequence of operations.
//!
//! `Option<D>` implements the sensor and radio traits too. A device that
//! failed to come up at start-up is passed as `None`; every operation on it
//! fails with [`DeviceError::Absent`] and the cycle carries on to sleep.

pub mod radio;
pub mod sensor;
pub mod sleep;

pub use radio::DatagramRadio;
pub use sensor::{HighPassFilter, InterruptPinMode, MotionSensor};
pub use sleep::{SleepController, WakeLevel};

/// Error from a device that may not have been initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError<E> {
    /// Device was never brought up
    Absent,
    /// Device reported an error
    Device(E),
}
