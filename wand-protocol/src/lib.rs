//! Wand Motion Event Protocol
//!
//! This crate defines the datagram the wand sends to its receiver dongle
//! over ESP-NOW. The protocol is one-way and connectionless: no
//! acknowledgement, no sequence number, no retransmission beyond the
//! sender's fixed burst.
//!
//! # Payload Layout
//!
//! Every datagram is a fixed 36-byte record:
//! ```text
//! ┌──────────────────────────────┬──────────────┐
//! │ TAG                          │ TIMESTAMP    │
//! │ 32B, UTF-8, NUL-padded       │ 4B, u32 LE   │
//! └──────────────────────────────┴──────────────┘
//! ```
//!
//! The timestamp is the sender's uptime in milliseconds at the moment the
//! payload was built. It is not synchronised with the receiver and restarts
//! on every wake, so receivers should only use it to tell bursts apart.

#![no_std]
#![deny(unsafe_code)]

pub mod address;
pub mod event;

pub use address::{AddressError, MacAddress};
pub use event::{MotionEvent, PayloadError, PAYLOAD_SIZE, TAG_FIELD_SIZE, TOGGLE_TAG};
