//! Time source abstractions
//!
//! The wake cycle needs two things from time: a millisecond uptime for the
//! payload timestamp, and a "wait at least D" stall for the sensor settle
//! interval and the spacing between burst sends. Both come from one
//! injectable [`Clock`] so tests can run against a fake clock.

use heapless::Vec;

/// Monotonic clock with blocking waits
pub trait Clock {
    /// Milliseconds elapsed since this execution began
    ///
    /// Not wall-clock time. Restarts from zero on every wake.
    fn uptime_ms(&self) -> u64;

    /// Block for at least `ms` milliseconds
    ///
    /// Implementations may overshoot but never return early. Nothing else
    /// runs during the wait.
    fn wait_at_least_ms(&mut self, ms: u32);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn uptime_ms(&self) -> u64 {
        (**self).uptime_ms()
    }

    fn wait_at_least_ms(&mut self, ms: u32) {
        (**self).wait_at_least_ms(ms)
    }
}

/// Clock that only advances when waited on
///
/// Used for host tests: every wait is recorded and moves time forward by
/// exactly the requested amount, so settle and spacing behaviour can be
/// checked without real elapsed time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: u64,
    /// Wait log, oldest first (extra waits past capacity are not recorded)
    waits: Vec<u32, MAX_RECORDED_WAITS>,
}

/// Number of waits a [`ManualClock`] remembers
pub const MAX_RECORDED_WAITS: usize = 32;

impl ManualClock {
    /// Create a clock starting at `start_ms`
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: start_ms,
            waits: Vec::new(),
        }
    }

    /// Durations of every wait performed so far, oldest first
    pub fn waits(&self) -> &[u32] {
        &self.waits
    }
}

impl Clock for ManualClock {
    fn uptime_ms(&self) -> u64 {
        self.now_ms
    }

    fn wait_at_least_ms(&mut self, ms: u32) {
        let _ = self.waits.push(ms);
        self.now_ms += ms as u64;
    }
}
