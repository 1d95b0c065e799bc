//! Repeating-callback scheduler.
//!
//! The timer engine never sleeps or spawns anything. It asks a [`Scheduler`]
//! for a repeating slot and gets back a [`TickHandle`]; whoever owns the
//! scheduler is responsible for delivering fired handles back to the engine.
//!
//! [`IntervalScheduler`] keeps its own monotonic clock that only moves when
//! the host calls [`IntervalScheduler::pop_due`] / [`IntervalScheduler::advance_to`].
//! The CLI feeds it wall-clock deltas; tests feed it exact durations.

use std::collections::BTreeMap;
use std::time::Duration;

/// Cadence of the countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Identifies one repeating slot. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Capability for recurring callbacks.
pub trait Scheduler {
    /// Register a slot that fires every `interval`, first after one interval.
    fn schedule_repeating(&mut self, interval: Duration) -> TickHandle;

    /// Cancel a slot. Unknown or already-cancelled handles are ignored.
    /// After this returns the handle never fires again.
    fn cancel(&mut self, handle: TickHandle);
}

#[derive(Debug, Clone)]
struct Slot {
    interval: Duration,
    next_due: Duration,
}

/// Virtual-clock scheduler.
#[derive(Debug, Clone, Default)]
pub struct IntervalScheduler {
    now: Duration,
    next_id: u64,
    slots: BTreeMap<TickHandle, Slot>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the scheduler's own clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live slots.
    pub fn active(&self) -> usize {
        self.slots.len()
    }

    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.slots.contains_key(&handle)
    }

    /// Pop the earliest firing that is due at or before `until`.
    ///
    /// The clock moves to that firing's due time and the slot is re-armed for
    /// its next period. Call repeatedly until `None`, handling each handle in
    /// between so that cancellations made by a handler suppress later firings.
    pub fn pop_due(&mut self, until: Duration) -> Option<TickHandle> {
        let (handle, due) = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.next_due <= until)
            .min_by_key(|(handle, slot)| (slot.next_due, **handle))
            .map(|(handle, slot)| (*handle, slot.next_due))?;

        if let Some(slot) = self.slots.get_mut(&handle) {
            slot.next_due = due.saturating_add(slot.interval);
        }
        self.now = self.now.max(due);
        Some(handle)
    }

    /// Move the clock forward without firing anything. Call after draining
    /// [`pop_due`](Self::pop_due). The clock never goes backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TickHandle {
        // a zero interval would fire forever within one pop_due loop
        let interval = interval.max(Duration::from_millis(1));
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.slots.insert(
            handle,
            Slot {
                interval,
                next_due: self.now.saturating_add(interval),
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.slots.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut IntervalScheduler, until: Duration) -> Vec<TickHandle> {
        let mut fired = Vec::new();
        while let Some(h) = s.pop_due(until) {
            fired.push(h);
        }
        s.advance_to(until);
        fired
    }

    #[test]
    fn fires_once_per_interval() {
        let mut s = IntervalScheduler::new();
        let h = s.schedule_repeating(TICK_INTERVAL);
        assert!(drain(&mut s, Duration::from_millis(999)).is_empty());
        assert_eq!(drain(&mut s, Duration::from_secs(1)), vec![h]);
        assert_eq!(drain(&mut s, Duration::from_secs(4)), vec![h, h, h]);
    }

    #[test]
    fn cancel_stops_firing() {
        let mut s = IntervalScheduler::new();
        let h = s.schedule_repeating(TICK_INTERVAL);
        s.cancel(h);
        assert!(!s.is_active(h));
        assert!(drain(&mut s, Duration::from_secs(10)).is_empty());
        // cancelling twice is harmless
        s.cancel(h);
    }

    #[test]
    fn slots_interleave_in_due_order() {
        let mut s = IntervalScheduler::new();
        let a = s.schedule_repeating(Duration::from_secs(2));
        let b = s.schedule_repeating(Duration::from_secs(3));
        assert_eq!(drain(&mut s, Duration::from_secs(6)), vec![a, b, a, a, b]);
    }

    #[test]
    fn scheduling_is_relative_to_current_clock() {
        let mut s = IntervalScheduler::new();
        s.advance_to(Duration::from_millis(500));
        let h = s.schedule_repeating(TICK_INTERVAL);
        assert!(drain(&mut s, Duration::from_millis(1400)).is_empty());
        assert_eq!(drain(&mut s, Duration::from_millis(1500)), vec![h]);
    }

    #[test]
    fn handles_are_not_reused() {
        let mut s = IntervalScheduler::new();
        let a = s.schedule_repeating(TICK_INTERVAL);
        s.cancel(a);
        let b = s.schedule_repeating(TICK_INTERVAL);
        assert_ne!(a, b);
        assert_eq!(s.active(), 1);
    }
}
