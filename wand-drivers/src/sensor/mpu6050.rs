//! MPU-6050 accelerometer (I2C, wake-on-motion)
//!
//! Only the motion-detection path is used. The gyro and sample registers
//! are never read.
//!
//! # Motion interrupt
//!
//! The digital high-pass filter feeds the motion detector. When the filtered
//! acceleration on any axis exceeds `MOT_THR` for `MOT_DUR` consecutive
//! samples, `INT_STATUS.MOT_INT` is set and the INT pin asserts. In latched
//! mode the pin stays high until any read of `INT_STATUS`.

use wand_core::traits::{HighPassFilter, InterruptPinMode, MotionSensor};
use wand_hal::I2cBus;

/// I2C address with AD0 tied low
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// MPU-6050 register addresses
pub mod reg {
    /// Accelerometer full scale and high-pass filter
    pub const ACCEL_CONFIG: u8 = 0x1C;
    /// Motion detection threshold (1 LSB = 2 mg)
    pub const MOT_THR: u8 = 0x1F;
    /// Motion detection duration (1 LSB = 1 ms)
    pub const MOT_DUR: u8 = 0x20;
    /// INT pin configuration
    pub const INT_PIN_CFG: u8 = 0x37;
    /// Interrupt source enable
    pub const INT_ENABLE: u8 = 0x38;
    /// Interrupt status (read clears in latched mode)
    pub const INT_STATUS: u8 = 0x3A;
    /// Power management 1
    pub const PWR_MGMT_1: u8 = 0x6B;
}

/// Register bit values
pub mod bits {
    /// PWR_MGMT_1: reset all registers
    pub const DEVICE_RESET: u8 = 0x80;
    /// PWR_MGMT_1: running, internal oscillator, sleep off
    pub const AWAKE: u8 = 0x00;
    /// INT_PIN_CFG: LATCH_INT_EN
    pub const LATCH_INT_EN: u8 = 1 << 5;
    /// INT_PIN_CFG: INT_RD_CLEAR (any read clears the status)
    pub const INT_RD_CLEAR: u8 = 1 << 4;
    /// INT_ENABLE: MOT_EN
    pub const MOT_EN: u8 = 1 << 6;
}

/// ACCEL_HPF field value for a cutoff
///
/// Written as the whole ACCEL_CONFIG byte, which also selects ±2 g full
/// scale and leaves self-test off.
pub fn high_pass_bits(filter: HighPassFilter) -> u8 {
    match filter {
        HighPassFilter::Reset => 0,
        HighPassFilter::Hz5 => 1,
        HighPassFilter::Hz2_5 => 2,
        HighPassFilter::Hz1_25 => 3,
        HighPassFilter::Hz0_63 => 4,
        HighPassFilter::Hold => 7,
    }
}

/// INT_PIN_CFG value for a pin mode
pub fn pin_config_bits(mode: InterruptPinMode) -> u8 {
    match mode {
        InterruptPinMode::Pulse => 0x00,
        InterruptPinMode::Latched => bits::LATCH_INT_EN | bits::INT_RD_CLEAR,
    }
}

/// MPU-6050 on an I2C bus
///
/// Each trait operation is exactly one bus transaction. Retrying is left to
/// the caller.
pub struct Mpu6050<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> Mpu6050<B> {
    /// Create a driver for the device at `address`
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), B::Error> {
        self.bus.write_register(self.address, register, value)
    }
}

impl<B: I2cBus> MotionSensor for Mpu6050<B> {
    type Error = B::Error;

    fn clear_interrupt(&mut self) -> Result<(), Self::Error> {
        self.bus
            .read_register(self.address, reg::INT_STATUS)
            .map(|_| ())
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.write(reg::PWR_MGMT_1, bits::DEVICE_RESET)
    }

    fn wake(&mut self) -> Result<(), Self::Error> {
        self.write(reg::PWR_MGMT_1, bits::AWAKE)
    }

    fn set_high_pass_filter(&mut self, filter: HighPassFilter) -> Result<(), Self::Error> {
        self.write(reg::ACCEL_CONFIG, high_pass_bits(filter))
    }

    fn set_interrupt_mode(&mut self, mode: InterruptPinMode) -> Result<(), Self::Error> {
        self.write(reg::INT_PIN_CFG, pin_config_bits(mode))
    }

    fn enable_motion_interrupt(&mut self) -> Result<(), Self::Error> {
        self.write(reg::INT_ENABLE, bits::MOT_EN)
    }

    fn set_motion_threshold(&mut self, threshold: u8) -> Result<(), Self::Error> {
        self.write(reg::MOT_THR, threshold)
    }

    fn set_motion_duration(&mut self, duration: u8) -> Result<(), Self::Error> {
        self.write(reg::MOT_DUR, duration)
    }
}
