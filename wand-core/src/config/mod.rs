//! Configuration types
//!
//! Deployment configuration for the transmitter. The firmware generates a
//! `const` [`WandConfig`] from `wand.toml` at build time; nothing here is
//! runtime state.

pub mod types;

pub use types::*;
