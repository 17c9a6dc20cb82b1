//! Wand Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the wake cycle is
//! written against. Chip-specific HALs implement them; host tests substitute
//! mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (wand-firmware)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wand-core / wand-drivers               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wand-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  wand-hal-    │
//!             │   esp32c3     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`retained::RetainedCounter`] - Counter that survives deep sleep
//! - [`time::Clock`] - Uptime and timed waits ([`time::ManualClock`] for tests)

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod retained;
pub mod time;

// Re-export key traits at crate root for convenience
pub use i2c::I2cBus;
pub use retained::RetainedCounter;
pub use time::{Clock, ManualClock};
