//! Motion sensor implementations

pub mod mpu6050;

pub use mpu6050::{Mpu6050, DEFAULT_ADDRESS};
