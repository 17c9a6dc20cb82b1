//! Configuration type definitions
//!
//! The reference configuration matches the first hardware build: an MPU-6050
//! on 0x68, a receiver dongle on channel 13, and a 3 × 2 ms burst.

use wand_protocol::MacAddress;

use crate::traits::HighPassFilter;

/// Shortest post-reset settle interval the sensor tolerates
pub const MIN_SETTLE_MS: u32 = 50;

/// Highest 2.4 GHz Wi-Fi channel
pub const MAX_CHANNEL: u8 = 14;

/// Transmit power limits in 0.25 dBm units (2 dBm .. 21 dBm)
pub const MIN_TX_POWER_QUARTER_DBM: i8 = 8;
pub const MAX_TX_POWER_QUARTER_DBM: i8 = 84;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Channel outside 1..=14
    InvalidChannel(u8),
    /// Peer address is broadcast or multicast
    PeerNotUnicast,
    /// Transmit power outside the supported range
    TxPowerOutOfRange(i8),
    /// Burst must send at least once
    EmptyBurst,
    /// Sensor address is not a 7-bit I2C address
    InvalidSensorAddress(u8),
    /// Settle interval shorter than [`MIN_SETTLE_MS`]
    SettleTooShort(u32),
    /// Motion threshold of zero triggers on noise
    ZeroThreshold,
    /// Motion duration of zero
    ZeroDuration,
}

/// The single receiver this transmitter talks to
///
/// Encryption is always disabled; there is no way to construct a
/// descriptor with it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerDescriptor {
    address: MacAddress,
    channel: u8,
}

impl PeerDescriptor {
    /// Create a peer descriptor
    pub const fn new(address: MacAddress, channel: u8) -> Self {
        Self { address, channel }
    }

    /// Receiver hardware address
    pub const fn address(&self) -> MacAddress {
        self.address
    }

    /// Wi-Fi channel both ends listen on
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Link encryption flag (always off)
    pub const fn encrypt(&self) -> bool {
        false
    }
}

/// Radio settings applied before sending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// Maximum transmit power in 0.25 dBm units (78 = 19.5 dBm)
    pub tx_power_quarter_dbm: i8,
}

/// Redundant send settings
///
/// The burst is the only reliability mechanism. Neither value has been
/// validated against real packet loss; both are deployment tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstConfig {
    /// Number of times the payload is sent
    pub count: u8,
    /// Pause after each send so the radio queue can drain
    pub spacing_ms: u32,
}

/// Motion sensor arming settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Motion threshold register value (higher = harder shake)
    pub threshold: u8,
    /// Motion duration register value (sustained-motion time before the interrupt fires)
    pub duration: u8,
    /// Wait after reset before the device is addressed again
    pub settle_ms: u32,
    /// High-pass cutoff for motion detection
    pub high_pass: HighPassFilter,
}

impl SensorConfig {
    /// Settle interval actually used, never below [`MIN_SETTLE_MS`]
    pub fn effective_settle_ms(&self) -> u32 {
        self.settle_ms.max(MIN_SETTLE_MS)
    }
}

/// Complete transmitter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WandConfig {
    pub peer: PeerDescriptor,
    pub radio: RadioConfig,
    pub burst: BurstConfig,
    pub sensor: SensorConfig,
}

impl WandConfig {
    /// Configuration of the reference hardware build
    ///
    /// Sensitivity guide for `threshold`: 20 very sensitive, 40 standard,
    /// 60 hard shake.
    pub const REFERENCE: Self = Self {
        peer: PeerDescriptor::new(MacAddress::new([0x84, 0x1F, 0xE8, 0x17, 0x62, 0xD4]), 13),
        radio: RadioConfig {
            tx_power_quarter_dbm: 78,
        },
        burst: BurstConfig {
            count: 3,
            spacing_ms: 2,
        },
        sensor: SensorConfig {
            address: 0x68,
            threshold: 40,
            duration: 1,
            settle_ms: MIN_SETTLE_MS,
            high_pass: HighPassFilter::Hz5,
        },
    };

    /// Check every field against the hardware limits
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let channel = self.peer.channel();
        if channel == 0 || channel > MAX_CHANNEL {
            return Err(ConfigError::InvalidChannel(channel));
        }
        if self.peer.address().is_multicast() {
            return Err(ConfigError::PeerNotUnicast);
        }

        let power = self.radio.tx_power_quarter_dbm;
        if !(MIN_TX_POWER_QUARTER_DBM..=MAX_TX_POWER_QUARTER_DBM).contains(&power) {
            return Err(ConfigError::TxPowerOutOfRange(power));
        }

        if self.burst.count == 0 {
            return Err(ConfigError::EmptyBurst);
        }

        if self.sensor.address > 0x7F {
            return Err(ConfigError::InvalidSensorAddress(self.sensor.address));
        }
        if self.sensor.settle_ms < MIN_SETTLE_MS {
            return Err(ConfigError::SettleTooShort(self.sensor.settle_ms));
        }
        if self.sensor.threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.sensor.duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        Ok(())
    }
}

impl Default for WandConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_is_valid() {
        assert_eq!(WandConfig::REFERENCE.validate(), Ok(()));
        assert_eq!(WandConfig::default(), WandConfig::REFERENCE);
    }

    #[test]
    fn test_reference_peer_registration() {
        let peer = WandConfig::REFERENCE.peer;
        assert!(!peer.encrypt());
        assert_eq!(peer.channel(), 13);
        assert_eq!(
            peer.address(),
            "84:1F:E8:17:62:D4".parse::<MacAddress>().unwrap()
        );
    }

    #[test]
    fn test_long_intervals_accepted() {
        let mut config = WandConfig::REFERENCE;
        config.burst.spacing_ms = u32::MAX;
        config.sensor.settle_ms = u32::MAX;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_channel_limits() {
        let mut config = WandConfig::REFERENCE;
        config.peer = PeerDescriptor::new(config.peer.address(), 0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidChannel(0)));

        config.peer = PeerDescriptor::new(config.peer.address(), 15);
        assert_eq!(config.validate(), Err(ConfigError::InvalidChannel(15)));

        config.peer = PeerDescriptor::new(config.peer.address(), 1);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_broadcast_peer_rejected() {
        let mut config = WandConfig::REFERENCE;
        config.peer = PeerDescriptor::new(MacAddress::BROADCAST, 13);
        assert_eq!(config.validate(), Err(ConfigError::PeerNotUnicast));
    }

    #[test]
    fn test_tx_power_limits() {
        let mut config = WandConfig::REFERENCE;
        config.radio.tx_power_quarter_dbm = 85;
        assert_eq!(config.validate(), Err(ConfigError::TxPowerOutOfRange(85)));
    }

    #[test]
    fn test_empty_burst_rejected() {
        let mut config = WandConfig::REFERENCE;
        config.burst.count = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyBurst));
    }

    #[test]
    fn test_sensor_limits() {
        let mut config = WandConfig::REFERENCE;
        config.sensor.settle_ms = 10;
        assert_eq!(config.validate(), Err(ConfigError::SettleTooShort(10)));
        assert_eq!(config.sensor.effective_settle_ms(), MIN_SETTLE_MS);

        let mut config = WandConfig::REFERENCE;
        config.sensor.address = 0x80;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSensorAddress(0x80))
        );

        let mut config = WandConfig::REFERENCE;
        config.sensor.threshold = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroThreshold));

        let mut config = WandConfig::REFERENCE;
        config.sensor.duration = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }
}
