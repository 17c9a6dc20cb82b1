//! Build script for wand-firmware
//!
//! - Passes the esp-hal and defmt linker scripts
//! - Validates wand.toml at compile time
//! - Generates `config.rs` with the validated configuration as a constant

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use wand_core::traits::HighPassFilter;
use wand_core::{
    BurstConfig, ConfigError, PeerDescriptor, RadioConfig, SensorConfig, WandConfig,
};
use wand_protocol::MacAddress;

fn main() {
    setup_linker();
    let config = validate_config();
    write_config(&config);
}

/// Pass linker scripts for the esp-hal runtime and defmt
fn setup_linker() {
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate wand.toml configuration at compile time
///
/// Fields are read into a [`WandConfig`] and checked with
/// [`WandConfig::validate`], the same rules the firmware is built against.
fn validate_config() -> WandConfig {
    // Re-run if wand.toml changes
    println!("cargo:rerun-if-changed=wand.toml");

    let config_path = Path::new("wand.toml");

    if !config_path.exists() {
        fail(
            "wand.toml not found!",
            &[
                "The firmware requires a wand.toml configuration file.".to_string(),
                "Please create one in the wand-firmware directory.".to_string(),
            ],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read wand.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in wand.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    validate_required_sections(&config);

    let mut errors = Vec::new();

    let address = match field(&config, "peer", "address").and_then(|v| v.as_str()) {
        Some(text) => text.parse::<MacAddress>().unwrap_or_else(|e| {
            errors.push(format!(
                "[peer] address '{}' is not AA:BB:CC:DD:EE:FF ({:?})",
                text, e
            ));
            MacAddress::new([0; 6])
        }),
        None => {
            errors.push("[peer] missing 'address' string".to_string());
            MacAddress::new([0; 6])
        }
    };

    // Only the storage type is checked here; value rules live in validate()
    let channel = integer(&config, "peer", "channel", 0, u8::MAX as i64, &mut errors) as u8;
    let tx_power_quarter_dbm = integer(
        &config,
        "radio",
        "tx_power_quarter_dbm",
        i8::MIN as i64,
        i8::MAX as i64,
        &mut errors,
    ) as i8;
    let count = integer(&config, "burst", "count", 0, u8::MAX as i64, &mut errors) as u8;
    let spacing_ms = integer(&config, "burst", "spacing_ms", 0, u32::MAX as i64, &mut errors) as u32;
    let sensor_address = integer(&config, "sensor", "address", 0, u8::MAX as i64, &mut errors) as u8;
    let threshold = integer(&config, "sensor", "threshold", 0, u8::MAX as i64, &mut errors) as u8;
    let duration = integer(&config, "sensor", "duration", 0, u8::MAX as i64, &mut errors) as u8;
    let settle_ms = integer(&config, "sensor", "settle_ms", 0, u32::MAX as i64, &mut errors) as u32;

    let high_pass = match field(&config, "sensor", "high_pass").and_then(|v| v.as_str()) {
        Some(name) => high_pass_filter(name).unwrap_or_else(|| {
            errors.push(format!(
                "[sensor] high_pass '{}' must be reset, 5hz, 2.5hz, 1.25hz, 0.63hz or hold",
                name
            ));
            HighPassFilter::default()
        }),
        None => {
            errors.push("[sensor] missing 'high_pass' string".to_string());
            HighPassFilter::default()
        }
    };

    if !errors.is_empty() {
        fail("Invalid configuration in wand.toml", &errors);
    }

    let wand = WandConfig {
        peer: PeerDescriptor::new(address, channel),
        radio: RadioConfig {
            tx_power_quarter_dbm,
        },
        burst: BurstConfig { count, spacing_ms },
        sensor: SensorConfig {
            address: sensor_address,
            threshold,
            duration,
            settle_ms,
            high_pass,
        },
    };

    if let Err(e) = wand.validate() {
        fail("Invalid configuration in wand.toml", &[describe(e)]);
    }

    println!("cargo:warning=wand.toml validated successfully");

    wand
}

/// Human-readable message for a rejected configuration
fn describe(error: ConfigError) -> String {
    match error {
        ConfigError::InvalidChannel(c) => format!("[peer] channel {} must be 1-14", c),
        ConfigError::PeerNotUnicast => {
            "[peer] address must be unicast (not broadcast/multicast)".to_string()
        }
        ConfigError::TxPowerOutOfRange(p) => {
            format!("[radio] tx_power_quarter_dbm {} must be 8-84", p)
        }
        ConfigError::EmptyBurst => "[burst] count must be at least 1".to_string(),
        ConfigError::InvalidSensorAddress(a) => {
            format!("[sensor] address 0x{:02X} is not a 7-bit I2C address", a)
        }
        ConfigError::SettleTooShort(ms) => format!("[sensor] settle_ms {} must be at least 50", ms),
        ConfigError::ZeroThreshold => "[sensor] threshold must be 1-255".to_string(),
        ConfigError::ZeroDuration => "[sensor] duration must be 1-255".to_string(),
    }
}

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let errors: Vec<String> = ["peer", "radio", "burst", "sensor"]
        .iter()
        .filter(|section| !matches!(config.get(**section), Some(toml::Value::Table(_))))
        .map(|section| format!("Missing [{}] section", section))
        .collect();

    if !errors.is_empty() {
        fail("Missing required sections in wand.toml", &errors);
    }
}

fn field<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

/// Read an integer field and check its range
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match field(config, section, key) {
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => *value,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

fn high_pass_filter(name: &str) -> Option<HighPassFilter> {
    match name.to_ascii_lowercase().as_str() {
        "reset" | "off" => Some(HighPassFilter::Reset),
        "5hz" => Some(HighPassFilter::Hz5),
        "2.5hz" => Some(HighPassFilter::Hz2_5),
        "1.25hz" => Some(HighPassFilter::Hz1_25),
        "0.63hz" => Some(HighPassFilter::Hz0_63),
        "hold" => Some(HighPassFilter::Hold),
        _ => None,
    }
}

/// Emit `config.rs` into OUT_DIR
fn write_config(config: &WandConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    let octets = config
        .peer
        .address()
        .octets()
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(", ");

    let source = format!(
        "/// Configuration validated from wand.toml at build time\n\
         pub const CONFIG: wand_core::WandConfig = wand_core::WandConfig {{\n\
         \x20   peer: wand_core::PeerDescriptor::new(\n\
         \x20       wand_protocol::MacAddress::new([{octets}]),\n\
         \x20       {channel},\n\
         \x20   ),\n\
         \x20   radio: wand_core::RadioConfig {{\n\
         \x20       tx_power_quarter_dbm: {tx_power},\n\
         \x20   }},\n\
         \x20   burst: wand_core::BurstConfig {{\n\
         \x20       count: {count},\n\
         \x20       spacing_ms: {spacing},\n\
         \x20   }},\n\
         \x20   sensor: wand_core::SensorConfig {{\n\
         \x20       address: 0x{sensor:02X},\n\
         \x20       threshold: {threshold},\n\
         \x20       duration: {duration},\n\
         \x20       settle_ms: {settle},\n\
         \x20       high_pass: wand_core::traits::HighPassFilter::{high_pass},\n\
         \x20   }},\n\
         }};\n",
        octets = octets,
        channel = config.peer.channel(),
        tx_power = config.radio.tx_power_quarter_dbm,
        count = config.burst.count,
        spacing = config.burst.spacing_ms,
        sensor = config.sensor.address,
        threshold = config.sensor.threshold,
        duration = config.sensor.duration,
        settle = config.sensor.settle_ms,
        high_pass = format!("{:?}", config.sensor.high_pass),
    );

    if let Err(e) = fs::write(out_dir.join("config.rs"), source) {
        fail("Failed to write generated config.rs", &[e.to_string()]);
    }
}

/// Abort the build with a boxed error report
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format_error_line(e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Format one error line with box drawing
fn format_error_line(line: &str) -> String {
    let truncated = if line.chars().count() > 62 {
        format!("{}...", line.chars().take(59).collect::<String>())
    } else {
        line.to_string()
    };
    format!("║  • {:<62} ║", truncated)
}
