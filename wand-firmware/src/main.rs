//! Wand - Wake-on-Motion Toggle Transmitter Firmware
//!
//! Main firmware binary for ESP32-C3 boards with an MPU-6050 on I2C.
//!
//! Every power-on and every wake runs one cycle and ends in deep sleep:
//! clear the sensor interrupt, send a toggle burst to the receiver (not on
//! the first power-on), count the boot, re-arm wake-on-motion, sleep until
//! the sensor drives the wake pin high.
//!
//! # Wiring (ESP32-C3 SuperMini)
//!
//! | Signal      | Pin   |
//! |-------------|-------|
//! | MPU INT     | GPIO4 |
//! | I2C SDA     | GPIO8 |
//! | I2C SCL     | GPIO9 |

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

extern crate alloc;

use defmt::{info, warn, Debug2Format};
use esp_hal::clock::CpuClock;
use esp_hal::i2c::master::I2c;
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::peripherals::{GPIO4, LPWR, SW_INTERRUPT, TIMG0, WIFI};
use esp_hal::rtc_cntl::Rtc;
use esp_hal::timer::timg::TimerGroup;
use static_cell::StaticCell;
use {esp_backtrace as _, esp_println as _};

use wand_core::traits::{SleepController, WakeLevel};
use wand_core::{CycleReport, TransmitOutcome, WakeCycle};
use wand_drivers::sensor::Mpu6050;
use wand_hal::i2c::I2cConfig;
use wand_hal::RetainedCounter;
use wand_hal_esp32c3::i2c::master_config;
use wand_hal_esp32c3::{DeepSleep, EspNowRadio, RtcBootCounter, SystemClock};

mod config {
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

use config::CONFIG;

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

// The Wi-Fi driver borrows the radio controller for 'static
static RADIO: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

/// Main entry point
#[esp_hal::main]
fn main() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));

    // esp-radio requires an allocator
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 66320);

    let counter = RtcBootCounter::new();
    info!("Wand starting (boot count {})", counter.load());

    let sensor = match I2c::new(peripherals.I2C0, master_config(I2cConfig::STANDARD)) {
        Ok(i2c) => {
            let i2c = i2c.with_sda(peripherals.GPIO8).with_scl(peripherals.GPIO9);
            Some(Mpu6050::new(i2c, CONFIG.sensor.address))
        }
        Err(e) => {
            warn!("I2C init failed: {}", Debug2Format(&e));
            None
        }
    };

    // Only called on a wake, after the sensor interrupt is cleared
    let open_radio =
        move || start_radio(peripherals.TIMG0, peripherals.SW_INTERRUPT, peripherals.WIFI);

    let sleep = DeepSleep::new(Rtc::new(peripherals.LPWR), peripherals.GPIO4);

    WakeCycle::new(sensor, open_radio, SystemClock::new(), counter, CONFIG).run(sleep, log_report)
}

/// Start the scheduler and the Wi-Fi driver for ESP-NOW
///
/// Returns `None` if the driver fails to start. The cycle then records the
/// transmission as abandoned and still goes to sleep.
fn start_radio(
    timg0: TIMG0<'static>,
    sw_interrupt: SW_INTERRUPT<'static>,
    wifi: WIFI<'static>,
) -> Option<EspNowRadio<'static>> {
    let timg0 = TimerGroup::new(timg0);
    let sw_interrupt = SoftwareInterruptControl::new(sw_interrupt);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    let controller = match esp_radio::init() {
        Ok(controller) => RADIO.init(controller),
        Err(e) => {
            warn!("Radio init failed: {}", Debug2Format(&e));
            return None;
        }
    };

    match esp_radio::wifi::new(controller, wifi, Default::default()) {
        Ok((wifi_controller, interfaces)) => {
            Some(EspNowRadio::new(wifi_controller, interfaces.esp_now))
        }
        Err(e) => {
            warn!("Wi-Fi init failed: {}", Debug2Format(&e));
            None
        }
    }
}

fn log_report(report: &CycleReport) {
    info!("{} (boot count now {})", report.state, report.boot_count);

    if !report.interrupt_cleared {
        warn!("Interrupt status read failed");
    }

    match report.transmit {
        TransmitOutcome::Skipped => info!("Cold boot, nothing sent"),
        TransmitOutcome::Abandoned(step) => warn!("Radio bring-up failed at {}", step),
        TransmitOutcome::Sent(tally) => info!(
            "Toggle sent: {}/{} queued",
            tally.succeeded(),
            tally.attempted
        ),
    }

    if report.arm.is_clean() {
        info!("Motion wake armed");
    } else {
        warn!(
            "Motion wake armed with {}/{} failed writes",
            report.arm.failed, report.arm.attempted
        );
    }

    info!("Entering deep sleep");
}

/// Halt hook for `esp-backtrace`
///
/// Panics end in the same armed deep sleep as a normal cycle. The sensor
/// keeps its configuration from the last cycle that reached the arming step.
#[no_mangle]
fn custom_halt() -> ! {
    // SAFETY: the panicking cycle never resumes, so nothing else uses these
    // peripherals from here on.
    let (lpwr, gpio4) = unsafe { (LPWR::steal(), GPIO4::steal()) };
    DeepSleep::new(Rtc::new(lpwr), gpio4).sleep_until(WakeLevel::High)
}
