/// Declares a static global wake counter protected by a `critical_section`
/// mutex.
///
/// This macro creates a `static` singleton `WAKE_COUNTER` suitable for use
/// in interrupt-based environments, where the watchdog ISR and the main flow
/// both touch the cycle count.
///
/// # Example
/// ```ignore
/// init_wake_counter!();
/// ```
#[macro_export]
macro_rules! init_wake_counter {
    () => {
        pub static WAKE_COUNTER: $crate::critical_section::Mutex<core::cell::Cell<u16>> =
            $crate::critical_section::Mutex::new(core::cell::Cell::new(0));
    };
}

/// Increments the global `WAKE_COUNTER` declared by
/// [`init_wake_counter!`](crate::init_wake_counter).
///
/// This is the whole body of the watchdog interrupt handler; the main flow
/// must never call it.
///
/// # Example
/// ```ignore
/// init_wake_counter!();
///
/// #[avr_device::interrupt(attiny85)]
/// fn WDT() {
///     tick_wake_counter!();
/// }
/// ```
#[macro_export]
macro_rules! tick_wake_counter {
    () => {
        $crate::wake::increment_wake_counter(&WAKE_COUNTER);
    };
}
