//! Fixed-layout uplink payload for the deployed sensor node.
//!
//! Every transmit cycle builds a fresh 7-byte frame:
//!
//! | Byte | Content                                        |
//! |------|------------------------------------------------|
//! | 0    | letter flag: `0xFF` present, `0x00` empty      |
//! | 1–2  | battery voltage, little-endian                 |
//! | 3–4  | raw reflectance measurement, little-endian     |
//! | 5    | detection threshold, truncated to one byte     |
//! | 6    | radio module temperature reading               |
//!
//! The frame is plain data: no checksum, no framing, no versioning. Replay
//! and ordering protection come from the LoRaWAN frame counter that travels
//! alongside the payload, not from the payload itself.

use crate::consts::{
    FLAG_EMPTY, FLAG_INDEX, FLAG_LETTER, MEASUREMENT_HI_INDEX, MEASUREMENT_LO_INDEX,
    TEMPERATURE_INDEX, THRESHOLD_INDEX, UPLINK_LEN, VOLTAGE_HI_INDEX, VOLTAGE_LO_INDEX,
};

/// One encoded uplink frame.
///
/// Construction is a pure data transformation over already-valid inputs;
/// there are no error conditions. The frame lives on the stack and is handed
/// to the radio by reference.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct UplinkPayload {
    bytes: [u8; UPLINK_LEN],
}

impl UplinkPayload {
    /// Encodes a payload from the values gathered in one wake cycle.
    ///
    /// `threshold` is truncated to its low byte; values above 255 wrap
    /// silently. In practice the threshold is a small build-time constant,
    /// but the truncation rule is part of the wire format.
    ///
    /// `temperature` is the raw byte read from the radio module's onboard
    /// sensor, forwarded as-is. Upstream marks that sensor as not working
    /// yet, so treat the field as best-effort telemetry rather than a
    /// calibrated value.
    pub fn new(
        letter: bool,
        voltage: u16,
        measurement: u16,
        threshold: u16,
        temperature: u8,
    ) -> Self {
        let mut bytes = [0u8; UPLINK_LEN];
        bytes[FLAG_INDEX] = if letter { FLAG_LETTER } else { FLAG_EMPTY };
        bytes[VOLTAGE_LO_INDEX] = (voltage & 0xff) as u8;
        bytes[VOLTAGE_HI_INDEX] = ((voltage >> 8) & 0xff) as u8;
        bytes[MEASUREMENT_LO_INDEX] = (measurement & 0xff) as u8;
        bytes[MEASUREMENT_HI_INDEX] = ((measurement >> 8) & 0xff) as u8;
        bytes[THRESHOLD_INDEX] = (threshold & 0xff) as u8;
        bytes[TEMPERATURE_INDEX] = temperature;
        Self { bytes }
    }

    /// The encoded frame.
    pub fn as_bytes(&self) -> &[u8; UPLINK_LEN] {
        &self.bytes
    }

    /// Whether this frame reports a letter in the box.
    pub fn letter_present(&self) -> bool {
        self.bytes[FLAG_INDEX] == FLAG_LETTER
    }
}

impl AsRef<[u8]> for UplinkPayload {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
