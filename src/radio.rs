//! Radio link contract for the deployed sensor node.
//!
//! The LoRaWAN stack (MAC layer, encryption, regional frequency plan, and
//! the transceiver register interface) is an external collaborator. This
//! module pins down the narrow surface the node actually uses: bring the
//! radio up, load session keys, fire one uplink with a frame counter, and
//! read the module's onboard temperature sensor.

use crate::consts::{DEVICE_ADDRESS_LEN, SESSION_KEY_LEN, UPLINK_LEN};
use core::fmt::Debug;

/// ABP session credentials for the LoRaWAN link.
///
/// Held by the caller (typically baked into the firmware image) and handed
/// to the radio once during node initialisation. Nothing in this crate
/// persists them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SessionKeys {
    /// Network session key.
    pub network_key: [u8; SESSION_KEY_LEN],
    /// Application session key.
    pub application_key: [u8; SESSION_KEY_LEN],
    /// Device address.
    pub device_address: [u8; DEVICE_ADDRESS_LEN],
}

impl SessionKeys {
    /// Bundles a key set.
    pub const fn new(
        network_key: [u8; SESSION_KEY_LEN],
        application_key: [u8; SESSION_KEY_LEN],
        device_address: [u8; DEVICE_ADDRESS_LEN],
    ) -> Self {
        Self {
            network_key,
            application_key,
            device_address,
        }
    }
}

/// The uplink surface of the LoRaWAN radio stack.
///
/// `send_data` returns a `Result` so callers can layer a retry policy on top
/// without changing the interface. The shipped node treats the link as
/// fire-and-forget: it reports a failed transmit but never retries it.
pub trait Radio {
    /// Error reported by the underlying radio stack.
    type Error: Debug;

    /// Initialises the transceiver. Called once during node setup.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Loads the ABP session credentials into the stack.
    fn set_keys(&mut self, keys: &SessionKeys);

    /// Transmits one uplink frame with the given frame counter.
    ///
    /// Blocks until the stack has accepted (or rejected) the frame. The
    /// frame counter is owned by the caller; the stack only serialises it
    /// into the uplink.
    fn send_data(&mut self, payload: &[u8; UPLINK_LEN], frame_counter: u16)
    -> Result<(), Self::Error>;

    /// Reads the transceiver's onboard temperature sensor.
    ///
    /// Best-effort raw value; the upstream hardware notes mark this sensor
    /// as not working yet, and no correction formula is applied here.
    fn read_temperature(&mut self) -> u8;
}
