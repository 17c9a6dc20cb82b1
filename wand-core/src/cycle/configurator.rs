//! Motion sensor arming
//!
//! Puts the sensor into a known wake-on-motion state. The sensor keeps no
//! configuration the firmware can rely on across deep sleep, so the full
//! sequence is reissued every cycle.

use wand_hal::Clock;

use crate::config::SensorConfig;
use crate::outcome::{BestEffort, Tally};
use crate::traits::{InterruptPinMode, MotionSensor};

/// Arm the sensor to raise a latched interrupt on motion
///
/// Issues eight writes in fixed order: reset, settle wait, wake, high-pass
/// cutoff, latched pin mode, motion interrupt enable, threshold, duration.
/// A failed write is tallied and the sequence moves on to the next one.
pub fn arm_motion_wake<S, C>(sensor: &mut S, clock: &mut C, config: &SensorConfig) -> Tally
where
    S: MotionSensor,
    C: Clock,
{
    let mut tally = Tally::default();

    tally.record(sensor.reset().settle());
    clock.wait_at_least_ms(config.effective_settle_ms());
    tally.record(sensor.wake().settle());
    tally.record(sensor.set_high_pass_filter(config.high_pass).settle());
    tally.record(sensor.set_interrupt_mode(InterruptPinMode::Latched).settle());
    tally.record(sensor.enable_motion_interrupt().settle());
    tally.record(sensor.set_motion_threshold(config.threshold).settle());
    tally.record(sensor.set_motion_duration(config.duration).settle());

    tally
}
