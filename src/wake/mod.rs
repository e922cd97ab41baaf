//! Wake-cycle timing utilities for the duty-cycled node.
//!
//! The sleep driver parks the MCU and lets the watchdog wake it at a nominal
//! one-second period; each wake increments a cycle counter, and the node only
//! acts once the counter reaches the configured sleep duration. This module
//! carries the pieces around that mechanism:
//!
//! - `sleep_ticks` / `const_sleep_ticks`: duration conversion helpers
//! - [`WakeSchedule`]: the pure elapsed-cycle gating arithmetic
//! - `global_wake_counter_init`, `increment_wake_counter`,
//!   `drain_wake_counter` and the `init_wake_counter!` / `tick_wake_counter!`
//!   macros: interrupt-safe counter plumbing (feature `wake-isr`)
//!
//! Common sleep durations: (for use with
//! [`SleepControl::set_sleep_duration`](crate::sleep::SleepControl::set_sleep_duration))
//!
//! | Ticks | Sleep interval   |
//! |-------|------------------|
//! |    16 | ~16 s (bench)    |
//! |    60 | ~1 minute        |
//! |   600 | ~10 minutes      |
//! |  1800 | ~30 min (default)|

use libm::round;

#[cfg(feature = "wake-isr")]
mod counter;
#[cfg_attr(feature = "wake-isr", allow(unused_imports))]
#[cfg(feature = "wake-isr")]
pub use counter::*;

#[cfg(feature = "wake-isr")]
mod macros;

mod schedule;
pub use schedule::WakeSchedule;

/// Nominal watchdog tick period in seconds.
pub const SECONDS_PER_TICK: u16 = 1;

/// Watchdog ticks per minute at the nominal 1 s tick.
pub const TICKS_PER_MINUTE: u16 = 60;

/// Converts a sleep interval in minutes to watchdog ticks.
///
/// # Arguments
/// - `minutes`: desired interval (e.g. 30.0 for the default deployment)
///
/// # Returns
/// - Tick count for the sleep driver (rounds to nearest integer)
pub fn sleep_ticks(minutes: f32) -> u16 {
    round((minutes * TICKS_PER_MINUTE as f32) as f64) as u16
}

/// Compile-time sleep interval conversion for whole minutes.
///
/// # Arguments
/// - `minutes`: desired interval in whole minutes
///
/// # Returns
/// - Tick count for the sleep driver
pub const fn const_sleep_ticks(minutes: u16) -> u16 {
    minutes * TICKS_PER_MINUTE
}

/// Converts a tick count back to minutes, for diagnostics.
pub fn sleep_minutes(ticks: u16) -> f32 {
    ticks as f32 / TICKS_PER_MINUTE as f32
}
