//! Deep sleep with an RTC-IO wake pin
//!
//! Only GPIO0..=GPIO5 are RTC-capable on the ESP32-C3 and can wake the chip
//! from deep sleep.

use esp_hal::gpio::RtcPinWithResistors;
use esp_hal::rtc_cntl::sleep::{RtcioWakeupSource, WakeupLevel};
use esp_hal::rtc_cntl::Rtc;
use wand_core::traits::{SleepController, WakeLevel};

/// Deep sleep controller owning the RTC and the wake pin
pub struct DeepSleep<'d, P> {
    rtc: Rtc<'d>,
    pin: P,
}

impl<'d, P> DeepSleep<'d, P>
where
    P: RtcPinWithResistors,
{
    pub fn new(rtc: Rtc<'d>, pin: P) -> Self {
        Self { rtc, pin }
    }
}

fn wakeup_level(level: WakeLevel) -> WakeupLevel {
    match level {
        WakeLevel::Low => WakeupLevel::Low,
        WakeLevel::High => WakeupLevel::High,
    }
}

impl<P> SleepController for DeepSleep<'_, P>
where
    P: RtcPinWithResistors,
{
    fn sleep_until(&mut self, level: WakeLevel) -> ! {
        let mut pins: [(&mut dyn RtcPinWithResistors, WakeupLevel); 1] =
            [(&mut self.pin, wakeup_level(level))];
        let wake = RtcioWakeupSource::new(&mut pins);
        self.rtc.sleep_deep(&[&wake])
    }
}
