//! Receiver hardware address

use core::fmt;
use core::str::FromStr;

/// Errors from parsing a textual MAC address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// Not six colon-separated groups
    WrongGroupCount,
    /// A group is not a two-digit hex byte
    InvalidHex,
}

/// 6-byte IEEE 802 MAC address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Broadcast address (`FF:FF:FF:FF:FF:FF`)
    pub const BROADCAST: Self = Self([0xFF; 6]);

    /// Create from raw bytes
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Raw bytes
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Check the multicast bit (least significant bit of the first octet)
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl FromStr for MacAddress {
    type Err = AddressError;

    /// Parse `AA:BB:CC:DD:EE:FF` (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 6];
        let mut groups = s.split(':');

        for byte in bytes.iter_mut() {
            let group = groups.next().ok_or(AddressError::WrongGroupCount)?;
            if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(AddressError::InvalidHex);
            }
            *byte = u8::from_str_radix(group, 16).map_err(|_| AddressError::InvalidHex)?;
        }

        if groups.next().is_some() {
            return Err(AddressError::WrongGroupCount);
        }

        Ok(Self(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MacAddress {
    fn format(&self, f: defmt::Formatter) {
        let [a, b, c, d, e, g] = self.0;
        defmt::write!(
            f,
            "{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}",
            a,
            b,
            c,
            d,
            e,
            g
        );
    }
}
