//! Test doubles for the capability traits
//!
//! All mocks write into one shared [`Trace`], so a test can check the exact
//! interleaving of sensor, radio, clock and counter operations.

extern crate std;

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use wand_hal::{Clock, RetainedCounter};
use wand_protocol::MacAddress;

use crate::config::PeerDescriptor;
use crate::traits::{
    DatagramRadio, HighPassFilter, InterruptPinMode, MotionSensor, SleepController, WakeLevel,
};

/// One observable operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    ClearInterrupt,
    OpenRadio,
    Reset,
    Wake,
    HighPass(HighPassFilter),
    InterruptMode(InterruptPinMode),
    EnableMotion,
    Threshold(u8),
    Duration(u8),
    StartStation,
    Disconnect,
    TxPower(i8),
    Channel(u8),
    AddPeer(PeerDescriptor),
    Send(MacAddress, Vec<u8>),
    PowerOff,
    Wait(u32),
    Increment(u32),
    Sleep(WakeLevel),
}

/// Shared, ordered operation log
#[derive(Debug, Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Op>>>);

impl Trace {
    pub fn push(&self, op: Op) {
        self.0.borrow_mut().push(op);
    }

    pub fn ops(&self) -> Vec<Op> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Operations matching `pred`, in order
    pub fn filtered(&self, pred: impl Fn(&Op) -> bool) -> Vec<Op> {
        self.0.borrow().iter().filter(|op| pred(op)).cloned().collect()
    }

    pub fn sends(&self) -> Vec<(MacAddress, Vec<u8>)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Send(to, payload) => Some((*to, payload.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, op: &Op) -> Option<usize> {
        self.0.borrow().iter().position(|o| o == op)
    }
}

/// Bus error reported by mocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Sensor that records every call; optionally every call fails
pub struct MockSensor {
    pub trace: Trace,
    pub fail_all: bool,
}

impl MockSensor {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            fail_all: false,
        }
    }

    pub fn failing(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            fail_all: true,
        }
    }

    fn record(&mut self, op: Op) -> Result<(), MockError> {
        self.trace.push(op);
        if self.fail_all {
            Err(MockError)
        } else {
            Ok(())
        }
    }
}

impl MotionSensor for MockSensor {
    type Error = MockError;

    fn clear_interrupt(&mut self) -> Result<(), Self::Error> {
        self.record(Op::ClearInterrupt)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.record(Op::Reset)
    }

    fn wake(&mut self) -> Result<(), Self::Error> {
        self.record(Op::Wake)
    }

    fn set_high_pass_filter(&mut self, filter: HighPassFilter) -> Result<(), Self::Error> {
        self.record(Op::HighPass(filter))
    }

    fn set_interrupt_mode(&mut self, mode: InterruptPinMode) -> Result<(), Self::Error> {
        self.record(Op::InterruptMode(mode))
    }

    fn enable_motion_interrupt(&mut self) -> Result<(), Self::Error> {
        self.record(Op::EnableMotion)
    }

    fn set_motion_threshold(&mut self, threshold: u8) -> Result<(), Self::Error> {
        self.record(Op::Threshold(threshold))
    }

    fn set_motion_duration(&mut self, duration: u8) -> Result<(), Self::Error> {
        self.record(Op::Duration(duration))
    }
}

/// Radio bring-up stage a [`MockRadio`] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioFault {
    None,
    StartStation,
    Disconnect,
    TxPower,
    Channel,
    AddPeer,
    Send,
}

/// Radio that records every call and fails at one scripted stage
pub struct MockRadio {
    pub trace: Trace,
    pub fault: RadioFault,
    pub powered: bool,
}

impl MockRadio {
    pub fn new(trace: &Trace) -> Self {
        Self::with_fault(trace, RadioFault::None)
    }

    pub fn with_fault(trace: &Trace, fault: RadioFault) -> Self {
        Self {
            trace: trace.clone(),
            fault,
            powered: false,
        }
    }

    /// Constructor for a cycle; logs when the cycle opens the radio
    pub fn opener(trace: &Trace, fault: RadioFault) -> impl FnOnce() -> MockRadio {
        let trace = trace.clone();
        move || {
            trace.push(Op::OpenRadio);
            MockRadio::with_fault(&trace, fault)
        }
    }

    fn record(&mut self, op: Op, stage: RadioFault) -> Result<(), MockError> {
        self.trace.push(op);
        if self.fault == stage {
            Err(MockError)
        } else {
            Ok(())
        }
    }
}

impl DatagramRadio for MockRadio {
    type Error = MockError;

    fn start_station(&mut self) -> Result<(), Self::Error> {
        self.powered = true;
        self.record(Op::StartStation, RadioFault::StartStation)
    }

    fn disconnect(&mut self) -> Result<(), Self::Error> {
        self.record(Op::Disconnect, RadioFault::Disconnect)
    }

    fn set_tx_power(&mut self, quarter_dbm: i8) -> Result<(), Self::Error> {
        self.record(Op::TxPower(quarter_dbm), RadioFault::TxPower)
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), Self::Error> {
        self.record(Op::Channel(channel), RadioFault::Channel)
    }

    fn add_peer(&mut self, peer: &PeerDescriptor) -> Result<(), Self::Error> {
        self.record(Op::AddPeer(*peer), RadioFault::AddPeer)
    }

    fn send(&mut self, to: &MacAddress, payload: &[u8]) -> Result<(), Self::Error> {
        self.record(Op::Send(*to, payload.to_vec()), RadioFault::Send)
    }

    fn power_off(&mut self) {
        self.powered = false;
        self.trace.push(Op::PowerOff);
    }
}

/// Fake clock that advances only on waits, and logs them
pub struct TraceClock {
    pub trace: Trace,
    pub now_ms: u64,
}

impl TraceClock {
    pub fn new(trace: &Trace, now_ms: u64) -> Self {
        Self {
            trace: trace.clone(),
            now_ms,
        }
    }
}

impl Clock for TraceClock {
    fn uptime_ms(&self) -> u64 {
        self.now_ms
    }

    fn wait_at_least_ms(&mut self, ms: u32) {
        self.trace.push(Op::Wait(ms));
        self.now_ms += ms as u64;
    }
}

/// In-memory retained counter that logs increments
pub struct TraceCounter {
    pub trace: Trace,
    pub value: u32,
}

impl TraceCounter {
    pub fn new(trace: &Trace, value: u32) -> Self {
        Self {
            trace: trace.clone(),
            value,
        }
    }
}

impl RetainedCounter for TraceCounter {
    fn load(&self) -> u32 {
        self.value
    }

    fn store(&mut self, value: u32) {
        self.trace.push(Op::Increment(value));
        self.value = value;
    }
}

/// Panic payload used by [`UnwindingSleep`]
pub struct Asleep;

/// Sleep controller that records the arm and unwinds instead of suspending
pub struct UnwindingSleep {
    pub trace: Trace,
}

impl UnwindingSleep {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl SleepController for UnwindingSleep {
    fn sleep_until(&mut self, level: WakeLevel) -> ! {
        self.trace.push(Op::Sleep(level));
        std::panic::panic_any(Asleep)
    }
}

/// Run `f`, which must end in [`UnwindingSleep::sleep_until`]
///
/// Panics if `f` unwinds with anything other than [`Asleep`].
pub fn expect_sleep(f: impl FnOnce()) {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Err(payload) if payload.is::<Asleep>() => {}
        Err(payload) => std::panic::resume_unwind(payload),
        Ok(()) => unreachable!("closure returned without sleeping"),
    }
}
