//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in wand-core for the transmitter's peripherals:
//!
//! - Motion sensors (MPU-6050 wake-on-motion)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
