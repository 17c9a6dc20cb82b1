//! I2C master configuration for ESP32-C3

use esp_hal::i2c::master::Config;
use esp_hal::time::Rate;
use wand_hal::i2c::I2cConfig;

/// Convert a bus configuration into an esp-hal master configuration
pub fn master_config(config: I2cConfig) -> Config {
    Config::default().with_frequency(Rate::from_hz(config.frequency))
}
