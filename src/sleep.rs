//! Low-power sleep and wake scheduling contract.
//!
//! The watchdog-based sleep driver is an external collaborator: it parks the
//! MCU in its deepest sleep mode, wakes it on a periodic watchdog interrupt,
//! and counts those wakes until the configured action interval has elapsed.
//! On the reference hardware the same power-management unit also measures
//! the supply voltage, so that reading lives on this trait too.
//!
//! The pure elapsed-cycle arithmetic behind `action_due` is available
//! separately as [`WakeSchedule`](crate::wake::WakeSchedule) for driver
//! implementations to embed; the ISR-side counter plumbing is in
//! [`crate::wake`] behind the `wake-isr` feature.

/// Sleep, wake gating, and supply-voltage surface of the power-management
/// driver.
pub trait SleepControl {
    /// Sets the action interval in watchdog ticks.
    ///
    /// Re-assigning the same value every cycle is the expected usage; the
    /// call is idempotent, not a one-time init.
    fn set_sleep_duration(&mut self, ticks: u16);

    /// Enters low-power sleep and blocks until the next wake interrupt.
    fn go_to_sleep(&mut self);

    /// Returns `true` once per elapsed action interval.
    ///
    /// The device wakes more often than it acts: each watchdog interrupt
    /// wakes the MCU, but this gate only opens when the accumulated wake
    /// count reaches the configured duration.
    fn action_due(&mut self) -> bool;

    /// Measures the supply (battery) voltage in millivolts.
    fn read_voltage(&mut self) -> u16;
}
