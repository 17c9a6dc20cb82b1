//! ESP-NOW datagram radio
//!
//! ESP-NOW rides on the Wi-Fi MAC in station mode without associating to an
//! access point. Frames go straight to a registered peer on a fixed
//! channel.

use esp_radio::esp_now::{EspNow, EspNowError, EspNowWifiInterface, PeerInfo};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiError};
use wand_core::traits::DatagramRadio;
use wand_core::PeerDescriptor;
use wand_protocol::MacAddress;

/// `ESP_OK` from the Wi-Fi driver
const ESP_OK: i32 = 0;

/// Error from radio operations
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Wi-Fi controller rejected the request
    Wifi(WifiError),
    /// ESP-NOW layer rejected the request
    EspNow(EspNowError),
    /// Raw driver call failed with this `esp_err_t`
    Driver(i32),
}

impl From<WifiError> for RadioError {
    fn from(e: WifiError) -> Self {
        RadioError::Wifi(e)
    }
}

impl From<EspNowError> for RadioError {
    fn from(e: EspNowError) -> Self {
        RadioError::EspNow(e)
    }
}

/// ESP-NOW peer registration for a descriptor
///
/// Always the station interface, never encrypted, pinned to the
/// descriptor's channel.
pub fn peer_info(peer: &PeerDescriptor) -> PeerInfo {
    PeerInfo {
        interface: EspNowWifiInterface::Sta,
        peer_address: peer.address().octets(),
        lmk: None,
        channel: Some(peer.channel()),
        encrypt: peer.encrypt(),
    }
}

/// ESP-NOW over the Wi-Fi controller
pub struct EspNowRadio<'d> {
    controller: WifiController<'d>,
    esp_now: EspNow<'d>,
}

impl<'d> EspNowRadio<'d> {
    /// Wrap the parts returned by `esp_radio::wifi::new`
    pub fn new(controller: WifiController<'d>, esp_now: EspNow<'d>) -> Self {
        Self {
            controller,
            esp_now,
        }
    }
}

impl DatagramRadio for EspNowRadio<'_> {
    type Error = RadioError;

    fn start_station(&mut self) -> Result<(), Self::Error> {
        self.controller
            .set_config(&ModeConfig::Client(ClientConfig::default()))?;
        self.controller.start()?;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), Self::Error> {
        self.controller.disconnect()?;
        Ok(())
    }

    #[allow(unsafe_code)]
    fn set_tx_power(&mut self, quarter_dbm: i8) -> Result<(), Self::Error> {
        // SAFETY: the driver is initialised and started (`start_station` ran
        // and we hold the controller), and the call takes a plain integer.
        let code = unsafe { esp_wifi_sys::include::esp_wifi_set_max_tx_power(quarter_dbm) };
        if code == ESP_OK {
            Ok(())
        } else {
            Err(RadioError::Driver(code))
        }
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), Self::Error> {
        self.esp_now.set_channel(channel)?;
        Ok(())
    }

    fn add_peer(&mut self, peer: &PeerDescriptor) -> Result<(), Self::Error> {
        self.esp_now.add_peer(peer_info(peer))?;
        Ok(())
    }

    fn send(&mut self, to: &MacAddress, payload: &[u8]) -> Result<(), Self::Error> {
        // Dropping the waiter blocks until the frame has left the queue; the
        // delivery status it carries is not used.
        let _waiter = self.esp_now.send(&to.octets(), payload)?;
        Ok(())
    }

    fn power_off(&mut self) {
        if let Err(_e) = self.controller.stop() {
            // The radio may still draw current through deep sleep
            #[cfg(feature = "defmt")]
            defmt::warn!("Wi-Fi stop failed: {}", _e);
        }
    }
}
