//! System timer clock

use esp_hal::delay::Delay;
use esp_hal::time::Instant;
use wand_hal::Clock;

/// Uptime from the system timer, waits by busy-looping
///
/// The system timer restarts on every wake, so uptime is time since this
/// execution began.
pub struct SystemClock {
    delay: Delay,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            delay: Delay::new(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn uptime_ms(&self) -> u64 {
        Instant::now().duration_since_epoch().as_millis()
    }

    fn wait_at_least_ms(&mut self, ms: u32) {
        self.delay.delay_millis(ms);
    }
}
