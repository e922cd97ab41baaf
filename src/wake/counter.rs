use core::cell::Cell;
use critical_section::Mutex;

/// A wake-cycle counter shared between the watchdog ISR and the main flow.
///
/// The ISR increments it while the main flow sleeps; after waking, the main
/// flow drains it into a [`WakeSchedule`](crate::wake::WakeSchedule). Every
/// access is a single-word read-modify-write inside a critical section, the
/// only interrupt-safety the system needs.
pub type WakeCounter = Mutex<Cell<u16>>;

/// Used to initialize the global static wake counter.
///
/// # Returns
/// * A zeroed counter cell
///
/// # Example
/// ```rust
/// use letterbox_sensor::wake::{WakeCounter, global_wake_counter_init};
///
/// static WAKE_COUNTER: WakeCounter = global_wake_counter_init();
/// ```
pub const fn global_wake_counter_init() -> WakeCounter {
    Mutex::new(Cell::new(0))
}

/// Increments the wake counter by one cycle.
///
/// Call from the watchdog interrupt service routine, and nowhere else.
///
/// # Example
/// ```ignore
/// #[avr_device::interrupt(attiny85)]
/// fn WDT() {
///     increment_wake_counter(&WAKE_COUNTER);
/// }
/// ```
pub fn increment_wake_counter(counter: &'static WakeCounter) {
    critical_section::with(|cs| {
        let cell = counter.borrow(cs);
        cell.set(cell.get().wrapping_add(1));
    });
}

/// Takes all accumulated wake cycles out of the counter, resetting it.
///
/// Call from the main flow after waking, before feeding the result into a
/// [`WakeSchedule`](crate::wake::WakeSchedule).
pub fn drain_wake_counter(counter: &'static WakeCounter) -> u16 {
    critical_section::with(|cs| {
        let cell = counter.borrow(cs);
        let cycles = cell.get();
        cell.set(0);
        cycles
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    static COUNTER: WakeCounter = global_wake_counter_init();

    #[test]
    fn test_increment_then_drain_resets_the_counter() {
        increment_wake_counter(&COUNTER);
        increment_wake_counter(&COUNTER);
        increment_wake_counter(&COUNTER);
        assert_eq!(drain_wake_counter(&COUNTER), 3);
        assert_eq!(drain_wake_counter(&COUNTER), 0);
    }
}
