//! Motion event encoding and decoding.
//!
//! Payload format:
//! - TAG (32 bytes): UTF-8 text, NUL-padded; at least one NUL terminator
//! - TIMESTAMP (4 bytes): sender uptime in milliseconds, little-endian

use heapless::String;

/// Size of the tag field in bytes
pub const TAG_FIELD_SIZE: usize = 32;

/// Longest tag that still leaves room for the NUL terminator
pub const MAX_TAG_LEN: usize = TAG_FIELD_SIZE - 1;

/// Size of the timestamp field in bytes
pub const TIMESTAMP_SIZE: usize = 4;

/// Complete payload size
pub const PAYLOAD_SIZE: usize = TAG_FIELD_SIZE + TIMESTAMP_SIZE;

/// Tag carried by every motion notification
pub const TOGGLE_TAG: &str = "TOGGLE";

/// Errors that can occur while building or decoding a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Tag does not fit in the tag field with its terminator
    TagTooLong,
    /// Tag contains an interior NUL byte
    TagContainsNul,
    /// Received datagram is not exactly [`PAYLOAD_SIZE`] bytes
    WrongLength,
    /// Tag field has no NUL terminator
    Unterminated,
    /// Tag bytes are not valid UTF-8
    InvalidTag,
}

/// A single motion notification
///
/// Built once per transmission attempt and sent unchanged by every send in
/// the burst. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionEvent {
    tag: String<MAX_TAG_LEN>,
    timestamp_ms: u32,
}

impl MotionEvent {
    /// Create an event with an arbitrary tag
    pub fn new(tag: &str, timestamp_ms: u32) -> Result<Self, PayloadError> {
        if tag.as_bytes().contains(&0) {
            return Err(PayloadError::TagContainsNul);
        }

        let mut owned = String::new();
        owned
            .push_str(tag)
            .map_err(|_| PayloadError::TagTooLong)?;

        Ok(Self {
            tag: owned,
            timestamp_ms,
        })
    }

    /// Create the toggle notification
    pub fn toggle(timestamp_ms: u32) -> Self {
        let mut tag = String::new();
        // TOGGLE_TAG is far shorter than MAX_TAG_LEN
        let _ = tag.push_str(TOGGLE_TAG);
        Self { tag, timestamp_ms }
    }

    /// Tag text
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Sender uptime when the event was built
    pub fn timestamp_ms(&self) -> u32 {
        self.timestamp_ms
    }

    /// Check whether this is a toggle notification
    pub fn is_toggle(&self) -> bool {
        self.tag.as_str() == TOGGLE_TAG
    }

    /// Encode into the fixed wire layout
    pub fn encode(&self) -> [u8; PAYLOAD_SIZE] {
        let mut buffer = [0u8; PAYLOAD_SIZE];
        let tag = self.tag.as_bytes();
        buffer[..tag.len()].copy_from_slice(tag);
        buffer[TAG_FIELD_SIZE..].copy_from_slice(&self.timestamp_ms.to_le_bytes());
        buffer
    }

    /// Decode a received datagram
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        if bytes.len() != PAYLOAD_SIZE {
            return Err(PayloadError::WrongLength);
        }

        let field = &bytes[..TAG_FIELD_SIZE];
        let end = field
            .iter()
            .position(|&b| b == 0)
            .ok_or(PayloadError::Unterminated)?;
        let tag = core::str::from_utf8(&field[..end]).map_err(|_| PayloadError::InvalidTag)?;

        let mut ts = [0u8; TIMESTAMP_SIZE];
        ts.copy_from_slice(&bytes[TAG_FIELD_SIZE..]);

        Self::new(tag, u32::from_le_bytes(ts))
    }
}
