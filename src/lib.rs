//! # letterbox-sensor
//!
//! A portable, no_std Rust firmware core for an infrared letterbox (mailbox)
//! sensor: an IR emitter/detector pair watches the box, and the device
//! reports whether a letter is lying in the beam path.
//!
//! This crate implements the full sensing and uplink logic using:
//! - `embedded-hal` traits for digital I/O and timing
//! - a narrow in-crate contract for the ADC, the LoRaWAN radio stack, and
//!   the watchdog sleep driver
//! - interrupt-safe wake counting with `critical-section`
//!
//! ## Crate features
//! | Feature      | Description |
//! |--------------|-------------|
//! | `std`        | Disables `#![no_std]` support (host builds and tests) |
//! | `wake-isr` (default) | `critical_section`-guarded wake counter helpers and macros |
//! | `log`        | Uses `log` diagnostics in the service and poll loops |
//! | `defmt-0-3`  | Derives `defmt::Format` on the public data types |
//!
//! ## Firmware variants
//!
//! Two builds share this core, differing only in configuration:
//!
//! - **Calibration** ([`calibrate::Calibrator`]): continuous polling with a
//!   status LED as direct feedback, for aiming the sensor head and tuning
//!   the threshold.
//! - **Deployed** ([`node::SensorNode`]): duty-cycled operation. Sleep
//!   ~30 minutes, wake, measure, transmit a 7-byte LoRaWAN uplink with an
//!   incrementing frame counter, sleep again.
//!
//! ## Usage
//!
//! The uplink wire format is plain data and usable on its own:
//!
//! ```rust
//! use letterbox_sensor::payload::UplinkPayload;
//!
//! let payload = UplinkPayload::new(true, 300, 45, 30, 20);
//! assert_eq!(payload.as_bytes(), &[0xFF, 0x2C, 0x01, 0x2D, 0x00, 30, 20]);
//! ```
//!
//! Wiring up a full node means implementing the three collaborator traits
//! ([`adc::AdcChannel`], [`radio::Radio`], [`sleep::SleepControl`]) for the
//! target hardware and handing everything to [`node::SensorNode`]; see the
//! module docs for worked examples.
//!
//! ## Integration Notes
//!
//! - The sleep driver's wake interrupt is the only concurrent context; the
//!   `wake` module carries the shared counter and ISR macros.
//! - The radio link is fire-and-forget: transmit failures are reported but
//!   never retried, and the frame counter only advances on success.
//! - Nothing is persisted; a power cycle resets the frame counter to 0.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded
//! environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "wake-isr")]
pub use critical_section;

pub mod adc;
pub mod calibrate;
pub mod config;
pub mod consts;
pub mod detect;
pub mod node;
pub mod payload;
pub mod radio;
pub mod sensor;
pub mod sleep;
pub mod wake;
