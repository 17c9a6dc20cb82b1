//! Board-agnostic core logic for the wand firmware
//!
//! This crate contains everything about a wake cycle that does not depend
//! on a specific chip:
//!
//! - Device capability traits (motion sensor, datagram radio, sleep)
//! - Configuration types and validation
//! - The wake cycle: boot sequencer, sensor arming, burst transmission
//! - Best-effort outcome and report types
//!
//! Every cycle ends asleep and armed. No failure on the bus or the radio is
//! allowed to stop the cycle short of the sleep call.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod outcome;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use config::{BurstConfig, ConfigError, PeerDescriptor, RadioConfig, SensorConfig, WandConfig};
pub use cycle::{arm_motion_wake, transmit_burst, BootState, CycleReport, WakeCycle};
pub use outcome::{BestEffort, InitStep, Tally, TransmitOutcome};
pub use traits::DeviceError;
