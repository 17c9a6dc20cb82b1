//! Retained state abstractions
//!
//! Provides a counter that survives the deep-sleep/wake transition but is
//! cleared by a full power loss. On chips with RTC memory this lives in the
//! always-on domain; ordinary RAM is lost across deep sleep and cannot back
//! this trait.

/// Counter retained across deep sleep
///
/// Lifecycle:
/// - zero after power is applied
/// - preserved verbatim across every suspend/resume
/// - changed only through [`RetainedCounter::increment`]
pub trait RetainedCounter {
    /// Read the current value
    fn load(&self) -> u32;

    /// Overwrite the stored value
    ///
    /// Implementations only need to store the value; callers go through
    /// [`RetainedCounter::increment`].
    fn store(&mut self, value: u32);

    /// Increment the counter by one and return the new value
    ///
    /// Saturates instead of wrapping so the value never decreases within one
    /// power session.
    fn increment(&mut self) -> u32 {
        let next = self.load().saturating_add(1);
        self.store(next);
        next
    }
}

impl<K: RetainedCounter + ?Sized> RetainedCounter for &mut K {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn store(&mut self, value: u32) {
        (**self).store(value)
    }

    fn increment(&mut self) -> u32 {
        (**self).increment()
    }
}
