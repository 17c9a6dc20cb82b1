//! Motion sensor trait

use super::DeviceError;

/// High-pass cutoff applied to the motion detection path
///
/// Removes slow drift (tilt, temperature) so only real movement crosses the
/// motion threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HighPassFilter {
    /// Filter disabled
    Reset,
    /// 5 Hz cutoff
    #[default]
    Hz5,
    /// 2.5 Hz cutoff
    Hz2_5,
    /// 1.25 Hz cutoff
    Hz1_25,
    /// 0.63 Hz cutoff
    Hz0_63,
    /// Hold the current sample as the reference
    Hold,
}

/// Interrupt pin behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPinMode {
    /// Short pulse per event
    Pulse,
    /// Pin stays asserted until the status register is read
    Latched,
}

/// Wake-on-motion capable accelerometer
///
/// Every operation is a single bus transaction. Implementations must not
/// retry; the caller decides what a failure means.
pub trait MotionSensor {
    /// Error type for bus operations
    type Error;

    /// Drop a latched interrupt line by reading the interrupt status
    ///
    /// The status value itself is discarded.
    fn clear_interrupt(&mut self) -> Result<(), Self::Error>;

    /// Start a device reset
    ///
    /// The device is not addressable until its settle interval has elapsed.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Clear the reset/sleep bits and run at normal power
    fn wake(&mut self) -> Result<(), Self::Error>;

    /// Set the motion-detection high-pass cutoff
    fn set_high_pass_filter(&mut self, filter: HighPassFilter) -> Result<(), Self::Error>;

    /// Configure how the interrupt pin is driven
    fn set_interrupt_mode(&mut self, mode: InterruptPinMode) -> Result<(), Self::Error>;

    /// Enable the motion interrupt source (and only that source)
    fn enable_motion_interrupt(&mut self) -> Result<(), Self::Error>;

    /// Write the motion threshold register
    fn set_motion_threshold(&mut self, threshold: u8) -> Result<(), Self::Error>;

    /// Write the motion duration register
    fn set_motion_duration(&mut self, duration: u8) -> Result<(), Self::Error>;
}

impl<S: MotionSensor> MotionSensor for Option<S> {
    type Error = DeviceError<S::Error>;

    fn clear_interrupt(&mut self) -> Result<(), Self::Error> {
        present(self)?.clear_interrupt().map_err(DeviceError::Device)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        present(self)?.reset().map_err(DeviceError::Device)
    }

    fn wake(&mut self) -> Result<(), Self::Error> {
        present(self)?.wake().map_err(DeviceError::Device)
    }

    fn set_high_pass_filter(&mut self, filter: HighPassFilter) -> Result<(), Self::Error> {
        present(self)?
            .set_high_pass_filter(filter)
            .map_err(DeviceError::Device)
    }

    fn set_interrupt_mode(&mut self, mode: InterruptPinMode) -> Result<(), Self::Error> {
        present(self)?
            .set_interrupt_mode(mode)
            .map_err(DeviceError::Device)
    }

    fn enable_motion_interrupt(&mut self) -> Result<(), Self::Error> {
        present(self)?
            .enable_motion_interrupt()
            .map_err(DeviceError::Device)
    }

    fn set_motion_threshold(&mut self, threshold: u8) -> Result<(), Self::Error> {
        present(self)?
            .set_motion_threshold(threshold)
            .map_err(DeviceError::Device)
    }

    fn set_motion_duration(&mut self, duration: u8) -> Result<(), Self::Error> {
        present(self)?
            .set_motion_duration(duration)
            .map_err(DeviceError::Device)
    }
}

fn present<S: MotionSensor>(sensor: &mut Option<S>) -> Result<&mut S, DeviceError<S::Error>> {
    sensor.as_mut().ok_or(DeviceError::Absent)
}
