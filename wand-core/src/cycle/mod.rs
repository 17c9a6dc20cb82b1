//! Wake cycle
//!
//! One cycle runs on every power-on and every wake from deep sleep:
//! clear the sensor interrupt, transmit if this is a wake, count the boot,
//! re-arm the sensor, sleep. The only state shared between cycles is the
//! retained boot counter.

pub mod configurator;
pub mod sequencer;
pub mod transmitter;

pub use configurator::arm_motion_wake;
pub use sequencer::{BootState, CycleReport, WakeCycle};
pub use transmitter::transmit_burst;
