//! Connectionless datagram radio trait

use wand_protocol::MacAddress;

use super::DeviceError;
use crate::config::PeerDescriptor;

/// Point-to-point, unacknowledged datagram radio (ESP-NOW and similar)
///
/// The transmitter drives one full bring-up/send/power-off sequence per
/// wake. Nothing is kept between wakes.
pub trait DatagramRadio {
    /// Error type for radio operations
    type Error;

    /// Power the interface up in station mode
    fn start_station(&mut self) -> Result<(), Self::Error>;

    /// Drop any existing access point association
    fn disconnect(&mut self) -> Result<(), Self::Error>;

    /// Force the maximum transmit power, in 0.25 dBm units
    fn set_tx_power(&mut self, quarter_dbm: i8) -> Result<(), Self::Error>;

    /// Tune to a fixed channel without scanning or associating
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Register the receiver as a peer
    fn add_peer(&mut self, peer: &PeerDescriptor) -> Result<(), Self::Error>;

    /// Queue one datagram for a registered peer
    ///
    /// `Ok` means the datagram was queued, not that it was delivered.
    fn send(&mut self, to: &MacAddress, payload: &[u8]) -> Result<(), Self::Error>;

    /// Power the interface off
    ///
    /// Must be safe to call in any state, including after a failed
    /// bring-up.
    fn power_off(&mut self);
}

impl<R: DatagramRadio> DatagramRadio for Option<R> {
    type Error = DeviceError<R::Error>;

    fn start_station(&mut self) -> Result<(), Self::Error> {
        present(self)?.start_station().map_err(DeviceError::Device)
    }

    fn disconnect(&mut self) -> Result<(), Self::Error> {
        present(self)?.disconnect().map_err(DeviceError::Device)
    }

    fn set_tx_power(&mut self, quarter_dbm: i8) -> Result<(), Self::Error> {
        present(self)?
            .set_tx_power(quarter_dbm)
            .map_err(DeviceError::Device)
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), Self::Error> {
        present(self)?
            .set_channel(channel)
            .map_err(DeviceError::Device)
    }

    fn add_peer(&mut self, peer: &PeerDescriptor) -> Result<(), Self::Error> {
        present(self)?.add_peer(peer).map_err(DeviceError::Device)
    }

    fn send(&mut self, to: &MacAddress, payload: &[u8]) -> Result<(), Self::Error> {
        present(self)?.send(to, payload).map_err(DeviceError::Device)
    }

    fn power_off(&mut self) {
        if let Some(radio) = self {
            radio.power_off();
        }
    }
}

fn present<R: DatagramRadio>(radio: &mut Option<R>) -> Result<&mut R, DeviceError<R::Error>> {
    radio.as_mut().ok_or(DeviceError::Absent)
}
