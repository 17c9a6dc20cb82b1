//! ESP32-C3-specific HAL for the Wand firmware
//!
//! This crate provides ESP32-C3 implementations of the `wand-hal` and
//! `wand-core` device traits:
//!
//! - [`retained::RtcBootCounter`] - boot counter in RTC fast memory
//! - [`clock::SystemClock`] - uptime from the system timer, busy-wait delays
//! - [`sleep::DeepSleep`] - deep sleep with an RTC-IO level wake
//! - [`radio::EspNowRadio`] - ESP-NOW datagrams over the Wi-Fi radio
//! - [`i2c`] - I2C master configuration
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod clock;
pub mod i2c;
pub mod radio;
pub mod retained;
pub mod sleep;

pub use clock::SystemClock;
pub use radio::{EspNowRadio, RadioError};
pub use retained::RtcBootCounter;
pub use sleep::DeepSleep;
