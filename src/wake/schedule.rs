//! Elapsed-cycle gating for the action interval.

/// Tracks elapsed wake cycles against a configured action interval.
///
/// The watchdog wakes the device far more often than it should sample and
/// transmit. `WakeSchedule` is the arithmetic behind that gate: feed it one
/// [`record_wake`](WakeSchedule::record_wake) per watchdog interrupt (or a
/// batch via [`advance`](WakeSchedule::advance)), and
/// [`action_due`](WakeSchedule::action_due) opens exactly once per elapsed
/// interval, resetting the count for the next one.
///
/// This struct is plain state with no interrupt awareness. Sleep-driver
/// implementations embed it and bridge the ISR-side counter to it; see
/// [`drain_wake_counter`](crate::wake::drain_wake_counter) under the
/// `wake-isr` feature.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct WakeSchedule {
    interval: u16,
    elapsed: u16,
}

impl WakeSchedule {
    /// Creates a schedule with the given action interval in ticks.
    pub const fn new(interval: u16) -> Self {
        Self {
            interval,
            elapsed: 0,
        }
    }

    /// Sets the action interval.
    ///
    /// Idempotent: the shipped firmware re-applies the same interval every
    /// cycle. Accumulated elapsed ticks are kept, so shortening the interval
    /// mid-flight can make the gate open on the next check.
    pub fn set_interval(&mut self, ticks: u16) {
        self.interval = ticks;
    }

    /// Records one wake interrupt.
    pub fn record_wake(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    /// Records a batch of wake interrupts at once.
    pub fn advance(&mut self, ticks: u16) {
        self.elapsed = self.elapsed.saturating_add(ticks);
    }

    /// Returns `true` once the elapsed count has reached the interval,
    /// resetting the count as it does.
    pub fn action_due(&mut self) -> bool {
        if self.elapsed >= self.interval {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    /// Wake cycles accumulated since the gate last opened.
    pub fn elapsed(&self) -> u16 {
        self.elapsed
    }
}
