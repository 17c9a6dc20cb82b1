//! Boot counter in RTC fast memory
//!
//! RTC fast memory stays powered in deep sleep. The runtime initializes it
//! on power-on and leaves it alone when the reset reason is a deep-sleep
//! wake, which gives exactly the retained-counter lifecycle.

use portable_atomic::{AtomicU32, Ordering};
use wand_hal::RetainedCounter;

#[esp_hal::ram(unstable(rtc_fast))]
static BOOT_COUNT: AtomicU32 = AtomicU32::new(0);

/// Handle to the boot counter
///
/// All handles share one counter; the firmware only ever creates one.
#[derive(Debug, Default)]
pub struct RtcBootCounter {
    _private: (),
}

impl RtcBootCounter {
    /// Get a handle to the counter
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl RetainedCounter for RtcBootCounter {
    fn load(&self) -> u32 {
        BOOT_COUNT.load(Ordering::Relaxed)
    }

    fn store(&mut self, value: u32) {
        BOOT_COUNT.store(value, Ordering::Relaxed);
    }
}
