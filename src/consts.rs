//! Constants shared across the letterbox sensor firmware logic.
//!
//! This module fixes the uplink payload layout, the per-variant detection
//! thresholds, the sampling parameters, and the duty-cycle timing defaults.
//!
//! ## Key Concepts
//!
//! - **Payload layout**: the uplink is a fixed 7-byte frame; the `*_INDEX`
//!   constants name each byte position so encoding and decoding logic never
//!   drift apart.
//! - **Thresholds**: a reflectance reading strictly above the threshold means
//!   a letter is present. The calibration build uses a lower threshold than
//!   the deployed build.
//! - **Sampling**: each measurement is the truncating mean of
//!   [`SAMPLE_COUNT`] ADC readings taken while the IR emitter is driven.
//! - **Duty cycle**: sleep durations are expressed in watchdog ticks of
//!   roughly one second; see [`crate::wake`] for conversions.

/// Length (in bytes) of the uplink payload frame.
///
/// The layout is fixed: flag, battery voltage (LE), measurement (LE),
/// threshold, radio temperature.
pub const UPLINK_LEN: usize = 7;

/// Byte position of the letter flag ([`FLAG_LETTER`] or [`FLAG_EMPTY`]).
pub const FLAG_INDEX: usize = 0;

/// Byte position of the battery voltage low byte.
pub const VOLTAGE_LO_INDEX: usize = 1;

/// Byte position of the battery voltage high byte.
pub const VOLTAGE_HI_INDEX: usize = 2;

/// Byte position of the reflectance measurement low byte.
pub const MEASUREMENT_LO_INDEX: usize = 3;

/// Byte position of the reflectance measurement high byte.
pub const MEASUREMENT_HI_INDEX: usize = 4;

/// Byte position of the detection threshold, truncated to one byte.
pub const THRESHOLD_INDEX: usize = 5;

/// Byte position of the radio module temperature reading.
pub const TEMPERATURE_INDEX: usize = 6;

/// Flag byte value reporting a letter in the box.
pub const FLAG_LETTER: u8 = 0xFF;

/// Flag byte value reporting an empty box.
pub const FLAG_EMPTY: u8 = 0x00;

/// Detection threshold for the calibration build.
///
/// Deliberately low so the status LED reacts to weak reflections while the
/// sensor geometry is being adjusted.
pub const CALIBRATION_THRESHOLD: u16 = 15;

/// Detection threshold for the deployed build.
pub const DEPLOYED_THRESHOLD: u16 = 30;

/// Number of ADC readings averaged into one measurement.
pub const SAMPLE_COUNT: u32 = 3;

/// Settle delay (ms) between emitter power-up and each ADC reading,
/// calibration build.
pub const CALIBRATION_SETTLE_MS: u32 = 15;

/// Settle delay (ms) between emitter power-up and each ADC reading,
/// deployed build.
pub const DEPLOYED_SETTLE_MS: u32 = 25;

/// Default sleep duration in watchdog ticks (~30 minutes at the 1 s tick).
pub const DEFAULT_SLEEP_TICKS: u16 = 1800;

/// Short sleep duration (~16 s) for bench testing the duty cycle.
pub const BENCH_SLEEP_TICKS: u16 = 16;

/// Pace (ms) of the calibration polling loop.
pub const CALIBRATION_POLL_MS: u32 = 100;

/// Duration (ms) of the single status blink emitted by the deployed node
/// during setup.
pub const DEPLOYED_BLINK_MS: u32 = 10;

/// Duration (ms) of each phase of the startup blink in the calibration build.
pub const CALIBRATION_BLINK_MS: u32 = 500;

/// Length (in bytes) of a LoRaWAN session key.
pub const SESSION_KEY_LEN: usize = 16;

/// Length (in bytes) of a LoRaWAN device address.
pub const DEVICE_ADDRESS_LEN: usize = 4;
