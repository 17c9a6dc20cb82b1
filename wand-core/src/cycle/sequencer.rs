//! Boot sequencer
//!
//! Single entry point for every power-on and every wake. The retained
//! counter is the only thing that tells the two apart.

use wand_hal::{Clock, RetainedCounter};

use super::configurator::arm_motion_wake;
use super::transmitter::transmit_burst;
use crate::config::WandConfig;
use crate::outcome::{BestEffort, Tally, TransmitOutcome};
use crate::traits::{DatagramRadio, MotionSensor, SleepController, WakeLevel};

/// Why this execution started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootState {
    /// Power was just applied (counter is zero)
    ColdBoot,
    /// Woken from deep sleep by the motion interrupt
    Woken,
}

impl BootState {
    /// Classify a boot from the retained counter value
    pub fn from_count(count: u32) -> Self {
        if count == 0 {
            BootState::ColdBoot
        } else {
            BootState::Woken
        }
    }

    /// Whether this boot sends a motion event
    pub fn transmits(&self) -> bool {
        matches!(self, BootState::Woken)
    }
}

/// Everything a cycle did before going to sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Boot classification at entry
    pub state: BootState,
    /// Counter value after this cycle's increment
    pub boot_count: u32,
    /// Whether the interrupt status read succeeded
    pub interrupt_cleared: bool,
    /// Transmitter result
    pub transmit: TransmitOutcome,
    /// Sensor arming writes
    pub arm: Tally,
}

/// One wake cycle over a set of devices
///
/// The radio is supplied as a constructor, `open_radio`, which only runs on a
/// wake and only after the interrupt has been cleared. A cold boot never
/// touches the radio.
pub struct WakeCycle<S, F, C, K> {
    sensor: S,
    open_radio: F,
    clock: C,
    counter: K,
    config: WandConfig,
}

impl<S, F, R, C, K> WakeCycle<S, F, C, K>
where
    S: MotionSensor,
    F: FnOnce() -> R,
    R: DatagramRadio,
    C: Clock,
    K: RetainedCounter,
{
    /// Assemble a cycle from its devices
    pub fn new(sensor: S, open_radio: F, clock: C, counter: K, config: WandConfig) -> Self {
        Self {
            sensor,
            open_radio,
            clock,
            counter,
            config,
        }
    }

    /// Configuration this cycle runs with
    pub fn config(&self) -> &WandConfig {
        &self.config
    }

    /// Run everything up to, but not including, sleep
    ///
    /// 1. Clear the latched motion interrupt
    /// 2. Open the radio and transmit, unless this is a cold boot
    /// 3. Increment the retained counter
    /// 4. Re-arm the sensor
    ///
    /// No failure stops the sequence early.
    pub fn prepare(self) -> CycleReport {
        let Self {
            mut sensor,
            open_radio,
            mut clock,
            mut counter,
            config,
        } = self;

        let interrupt_cleared = sensor.clear_interrupt().settle();

        let state = BootState::from_count(counter.load());
        let transmit = if state.transmits() {
            let mut radio = open_radio();
            transmit_burst(&mut radio, &mut clock, &config)
        } else {
            TransmitOutcome::Skipped
        };

        let boot_count = counter.increment();
        let arm = arm_motion_wake(&mut sensor, &mut clock, &config.sensor);

        CycleReport {
            state,
            boot_count,
            interrupt_cleared,
            transmit,
            arm,
        }
    }

    /// Run the full cycle and sleep until the wake pin goes high
    ///
    /// `observe` sees the report just before sleep; it is the last chance to
    /// log anything from this execution.
    pub fn run<Z>(self, mut sleep: Z, observe: impl FnOnce(&CycleReport)) -> !
    where
        Z: SleepController,
    {
        let report = self.prepare();
        observe(&report);
        sleep.sleep_until(WakeLevel::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{
        expect_sleep, MockRadio, MockSensor, Op, RadioFault, Trace, TraceClock, TraceCounter,
        UnwindingSleep,
    };
    use crate::outcome::InitStep;
    use crate::traits::{HighPassFilter, InterruptPinMode};
    use proptest::prelude::*;
    use wand_protocol::MotionEvent;

    extern crate std;
    use std::cell::Cell;
    use std::vec;
    use std::vec::Vec;

    fn arming_ops() -> Vec<Op> {
        vec![
            Op::Reset,
            Op::Wait(50),
            Op::Wake,
            Op::HighPass(HighPassFilter::Hz5),
            Op::InterruptMode(InterruptPinMode::Latched),
            Op::EnableMotion,
            Op::Threshold(40),
            Op::Duration(1),
        ]
    }

    fn cycle_with(
        trace: &Trace,
        fault: RadioFault,
        count: u32,
    ) -> WakeCycle<MockSensor, impl FnOnce() -> MockRadio, TraceClock, TraceCounter> {
        WakeCycle::new(
            MockSensor::new(trace),
            MockRadio::opener(trace, fault),
            TraceClock::new(trace, 0),
            TraceCounter::new(trace, count),
            WandConfig::REFERENCE,
        )
    }

    #[test]
    fn test_boot_state_from_count() {
        assert_eq!(BootState::from_count(0), BootState::ColdBoot);
        assert_eq!(BootState::from_count(1), BootState::Woken);
        assert_eq!(BootState::from_count(u32::MAX), BootState::Woken);
        assert!(!BootState::ColdBoot.transmits());
        assert!(BootState::Woken.transmits());
    }

    #[test]
    fn test_cold_boot() {
        let trace = Trace::default();
        let cycle = cycle_with(&trace, RadioFault::None, 0);

        let report = cycle.prepare();

        let mut expected = vec![Op::ClearInterrupt, Op::Increment(1)];
        expected.extend(arming_ops());
        assert_eq!(trace.ops(), expected);
        assert_eq!(trace.position(&Op::OpenRadio), None);

        assert_eq!(report.state, BootState::ColdBoot);
        assert_eq!(report.boot_count, 1);
        assert!(report.interrupt_cleared);
        assert_eq!(report.transmit, TransmitOutcome::Skipped);
        assert!(report.arm.is_clean());
    }

    #[test]
    fn test_first_wake() {
        let trace = Trace::default();
        let cycle = cycle_with(&trace, RadioFault::None, 1);

        let report = cycle.prepare();

        assert_eq!(report.state, BootState::Woken);
        assert_eq!(report.boot_count, 2);
        assert_eq!(report.transmit.payloads_queued(), 3);

        let sends = trace.sends();
        assert_eq!(sends.len(), 3);
        for (to, payload) in &sends {
            assert_eq!(*to, WandConfig::REFERENCE.peer.address());
            assert!(MotionEvent::decode(payload).unwrap().is_toggle());
        }

        // clear, open the radio, send, then count, then arm
        let cleared = trace.position(&Op::ClearInterrupt).unwrap();
        let opened = trace.position(&Op::OpenRadio).unwrap();
        let started = trace.position(&Op::StartStation).unwrap();
        let powered_off = trace.position(&Op::PowerOff).unwrap();
        let counted = trace.position(&Op::Increment(2)).unwrap();
        let reset = trace.position(&Op::Reset).unwrap();
        assert_eq!(cleared, 0);
        assert_eq!(opened, 1);
        assert_eq!(started, 2);
        assert!(powered_off < counted);
        assert!(counted < reset);

        let ops = trace.ops();
        assert_eq!(ops[reset..].to_vec(), arming_ops());
    }

    #[test]
    fn test_radio_opened_once_after_interrupt_clear() {
        let trace = Trace::default();
        let opened = Cell::new(0);
        let cycle = WakeCycle::new(
            MockSensor::new(&trace),
            || {
                opened.set(opened.get() + 1);
                assert_eq!(trace.ops(), vec![Op::ClearInterrupt]);
                MockRadio::new(&trace)
            },
            TraceClock::new(&trace, 0),
            TraceCounter::new(&trace, 7),
            WandConfig::REFERENCE,
        );

        cycle.prepare();

        assert_eq!(opened.get(), 1);
    }

    #[test]
    fn test_radio_failure_on_wake() {
        let trace = Trace::default();
        let cycle = cycle_with(&trace, RadioFault::AddPeer, 2);

        let report = cycle.prepare();

        assert_eq!(report.transmit, TransmitOutcome::Abandoned(InitStep::Peer));
        assert!(trace.sends().is_empty());
        assert!(trace.position(&Op::PowerOff).is_some());
        assert_eq!(report.boot_count, 3);
        assert!(report.arm.is_clean());

        let reset = trace.position(&Op::Reset).unwrap();
        assert_eq!(trace.ops()[reset..].to_vec(), arming_ops());
    }

    #[test]
    fn test_dead_sensor_does_not_stop_cycle() {
        let trace = Trace::default();
        let cycle = WakeCycle::new(
            MockSensor::failing(&trace),
            MockRadio::opener(&trace, RadioFault::None),
            TraceClock::new(&trace, 0),
            TraceCounter::new(&trace, 5),
            WandConfig::REFERENCE,
        );

        let report = cycle.prepare();

        assert!(!report.interrupt_cleared);
        assert_eq!(report.transmit.payloads_queued(), 3);
        assert_eq!(report.boot_count, 6);
        assert_eq!(report.arm.failed, 7);
        assert_eq!(trace.ops().last(), Some(&Op::Duration(1)));
    }

    #[test]
    fn test_run_ends_in_high_level_sleep() {
        let trace = Trace::default();
        let observed = Cell::new(None);

        expect_sleep(|| {
            let cycle = cycle_with(&trace, RadioFault::None, 1);
            cycle.run(UnwindingSleep::new(&trace), |report| {
                observed.set(Some(*report));
            })
        });

        let report = observed.get().unwrap();
        assert_eq!(report.boot_count, 2);

        let ops = trace.ops();
        assert_eq!(ops.last(), Some(&Op::Sleep(WakeLevel::High)));
        assert_eq!(ops[ops.len() - 2], Op::Duration(1));
        assert_eq!(trace.filtered(|op| matches!(op, Op::Sleep(_))).len(), 1);
    }

    #[test]
    fn test_absent_devices_still_count_and_sleep() {
        let trace = Trace::default();

        expect_sleep(|| {
            let cycle = WakeCycle::new(
                None::<MockSensor>,
                || None::<MockRadio>,
                TraceClock::new(&trace, 0),
                TraceCounter::new(&trace, 3),
                WandConfig::REFERENCE,
            );
            cycle.run(UnwindingSleep::new(&trace), |report| {
                assert!(!report.interrupt_cleared);
                assert_eq!(
                    report.transmit,
                    TransmitOutcome::Abandoned(InitStep::StationMode)
                );
                assert_eq!(report.boot_count, 4);
                assert_eq!(report.arm.failed, 7);
            })
        });

        assert_eq!(
            trace.ops(),
            vec![
                Op::Increment(4),
                Op::Wait(50),
                Op::Sleep(WakeLevel::High),
            ]
        );
    }

    #[test]
    fn test_saturated_counter_still_transmits() {
        let trace = Trace::default();
        let cycle = cycle_with(&trace, RadioFault::None, u32::MAX);

        let report = cycle.prepare();

        assert_eq!(report.boot_count, u32::MAX);
        assert_eq!(report.transmit.payloads_queued(), 3);
    }

    proptest! {
        #[test]
        fn prop_n_cycles_transmit_n_minus_one_times(cycles in 1usize..24) {
            let trace = Trace::default();
            let mut counter = TraceCounter::new(&trace, 0);
            let mut transmissions = 0;

            for n in 0..cycles {
                trace.clear();
                let cycle = WakeCycle::new(
                    MockSensor::new(&trace),
                    MockRadio::opener(&trace, RadioFault::None),
                    TraceClock::new(&trace, 0),
                    &mut counter,
                    WandConfig::REFERENCE,
                );
                let report = cycle.prepare();

                prop_assert_eq!(report.boot_count, n as u32 + 1);
                prop_assert_eq!(report.state.transmits(), n > 0);
                prop_assert_eq!(trace.position(&Op::OpenRadio).is_some(), n > 0);

                let sends = trace.sends().len();
                prop_assert!(sends == 0 || sends == 3);
                if sends > 0 {
                    transmissions += 1;
                }

                let reset = trace.position(&Op::Reset).unwrap();
                prop_assert_eq!(trace.ops()[reset..].to_vec(), arming_ops());
            }

            prop_assert_eq!(transmissions, cycles - 1);
            prop_assert_eq!(counter.load(), cycles as u32);
        }
    }
}
