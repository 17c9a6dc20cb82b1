//! Deep sleep trait

/// Logic level on the wake pin that resumes execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeLevel {
    Low,
    High,
}

/// Terminal sleep controller
///
/// Arms the single wake pin and suspends. Execution resumes from reset, so
/// nothing after this call ever runs.
pub trait SleepController {
    /// Arm the wake pin for `level` and enter deep sleep
    fn sleep_until(&mut self, level: WakeLevel) -> !;
}
