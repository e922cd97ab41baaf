//! Build-variant configuration for the letterbox sensor.
//!
//! Pin assignments are fixed by whichever HAL types the caller constructs;
//! everything else that differs between the calibration build and the
//! deployed build (threshold, settle delay, sleep duration, blink length)
//! lives in a [`SensorConfig`] so both variants share the same core logic.

use crate::consts::{
    CALIBRATION_BLINK_MS, CALIBRATION_SETTLE_MS, CALIBRATION_THRESHOLD, DEFAULT_SLEEP_TICKS,
    DEPLOYED_BLINK_MS, DEPLOYED_SETTLE_MS, DEPLOYED_THRESHOLD,
};

/// Configuration of one firmware variant.
///
/// Construct with [`SensorConfig::calibration`] or [`SensorConfig::deployed`]
/// and adjust fields as needed; the struct is plain data and freely copyable.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct SensorConfig {
    /// Reflectance reading strictly above this value means a letter is
    /// present.
    pub threshold: u16,

    /// Delay in milliseconds after powering the IR pair and before each ADC
    /// reading.
    pub settle_delay_ms: u32,

    /// Sleep duration in watchdog ticks, re-applied before every sleep.
    ///
    /// Unused by the calibration build, which never sleeps.
    pub sleep_ticks: u16,

    /// Length in milliseconds of the startup status blink.
    pub status_blink_ms: u32,
}

impl SensorConfig {
    /// Preset for the calibration build: low threshold, short settle delay,
    /// long startup blink for visual confirmation.
    pub const fn calibration() -> Self {
        Self {
            threshold: CALIBRATION_THRESHOLD,
            settle_delay_ms: CALIBRATION_SETTLE_MS,
            sleep_ticks: DEFAULT_SLEEP_TICKS,
            status_blink_ms: CALIBRATION_BLINK_MS,
        }
    }

    /// Preset for the deployed build: production threshold, longer settle
    /// delay, 30-minute sleep interval, minimal startup blink.
    pub const fn deployed() -> Self {
        Self {
            threshold: DEPLOYED_THRESHOLD,
            settle_delay_ms: DEPLOYED_SETTLE_MS,
            sleep_ticks: DEFAULT_SLEEP_TICKS,
            status_blink_ms: DEPLOYED_BLINK_MS,
        }
    }
}
