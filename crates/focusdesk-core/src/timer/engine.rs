//! Focus/break countdown engine.
//!
//! The engine owns no thread. `start()` registers one repeating slot with a
//! [`Scheduler`] and the owner delivers each fired [`TickHandle`] back
//! through [`TimerEngine::tick`].
//!
//! ## State Transitions
//!
//! ```text
//! (Focus, stopped) --start--> (Focus, running) --tick to 0--> (Break, stopped)
//! (Break, stopped) --start--> (Break, running) --tick to 0--> (Focus, stopped)
//! ```
//!
//! `set_mode`, `reset` and `pause` always leave the engine stopped.
//!
//! ## Usage
//!
//! ```ignore
//! let mut sched = IntervalScheduler::new();
//! let mut engine = TimerEngine::new();
//! engine.start(&mut sched);
//! // For every handle the scheduler fires:
//! engine.tick(&mut sched, handle);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::TimerMode;
use super::scheduler::{Scheduler, TickHandle, TICK_INTERVAL};
use crate::events::Event;

/// Persistable view of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: TimerMode,
    pub seconds_left: u32,
    #[serde(default)]
    pub running: bool,
}

/// What a delivered tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale handle or engine stopped; nothing changed.
    Ignored,
    /// One second consumed, countdown continues.
    Counting { seconds_left: u32 },
    /// Countdown hit zero. The engine is already stopped and switched to the
    /// opposite mode at full duration.
    Expired { finished: TimerMode },
}

/// Core timer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    mode: TimerMode,
    seconds_left: u32,
    /// The live repeating slot. `Some` exactly while running.
    handle: Option<TickHandle>,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Stopped, in focus mode, full duration.
    pub fn new() -> Self {
        Self {
            mode: TimerMode::Focus,
            seconds_left: TimerMode::Focus.duration_secs(),
            handle: None,
        }
    }

    /// Rebuild from a persisted snapshot. Always stopped; a ticking slot
    /// never outlives the process that owned it. A stored zero is never
    /// written by expiry, so it restores as a full block.
    pub fn restore(state: TimerState) -> Self {
        let full = state.mode.duration_secs();
        let seconds_left = match state.seconds_left {
            0 => full,
            n => n.min(full),
        };
        Self {
            mode: state.mode,
            seconds_left,
            handle: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<TickHandle> {
        self.handle
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            mode: self.mode,
            seconds_left: self.seconds_left,
            running: self.is_running(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch mode at full duration, stopped.
    pub fn set_mode(&mut self, scheduler: &mut dyn Scheduler, mode: TimerMode) -> Event {
        self.stop(scheduler);
        self.mode = mode;
        self.seconds_left = mode.duration_secs();
        Event::ModeChanged {
            mode,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        }
    }

    /// Begin ticking. `None` if already running; never registers a second slot.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        self.handle = Some(scheduler.schedule_repeating(TICK_INTERVAL));
        Some(Event::TimerStarted {
            mode: self.mode,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        })
    }

    /// Cancel the slot if any. Returns whether the engine was running.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        match self.handle.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }

    /// User-facing pause: `stop` plus an event when something was running.
    pub fn pause(&mut self, scheduler: &mut dyn Scheduler) -> Option<Event> {
        if !self.stop(scheduler) {
            return None;
        }
        Some(Event::TimerPaused {
            mode: self.mode,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        })
    }

    /// Stop and refill the current mode. Mode is unchanged.
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler) -> Event {
        self.stop(scheduler);
        self.seconds_left = self.mode.duration_secs();
        Event::TimerReset {
            mode: self.mode,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        }
    }

    /// Deliver one fired slot.
    pub fn tick(&mut self, scheduler: &mut dyn Scheduler, fired: TickHandle) -> TickOutcome {
        if self.handle != Some(fired) {
            return TickOutcome::Ignored;
        }

        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left > 0 {
            return TickOutcome::Counting {
                seconds_left: self.seconds_left,
            };
        }

        let finished = self.mode;
        self.stop(scheduler);
        self.seconds_left = 0;
        // does not auto-start the next mode
        self.set_mode(scheduler, finished.opposite());
        TickOutcome::Expired { finished }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::IntervalScheduler;
    use std::time::Duration;

    /// Drive the scheduler for `secs` seconds, delivering every firing.
    fn run_for(engine: &mut TimerEngine, sched: &mut IntervalScheduler, secs: u64) -> Vec<TickOutcome> {
        let until = sched.now() + Duration::from_secs(secs);
        let mut outcomes = Vec::new();
        while let Some(h) = sched.pop_due(until) {
            outcomes.push(engine.tick(sched, h));
        }
        sched.advance_to(until);
        outcomes
    }

    #[test]
    fn new_engine_is_stopped_focus_full() {
        let engine = TimerEngine::new();
        assert_eq!(
            engine.state(),
            TimerState {
                mode: TimerMode::Focus,
                seconds_left: 1500,
                running: false
            }
        );
    }

    #[test]
    fn start_pause_start() {
        let mut sched = IntervalScheduler::new();
        let mut engine = TimerEngine::new();

        assert!(engine.start(&mut sched).is_some());
        assert!(engine.is_running());
        assert_eq!(sched.active(), 1);

        assert!(engine.pause(&mut sched).is_some());
        assert!(!engine.is_running());
        assert_eq!(sched.active(), 0);

        // pausing twice is a no-op
        assert!(engine.pause(&mut sched).is_none());
        assert!(!engine.stop(&mut sched));
    }

    #[test]
    fn double_start_keeps_single_slot() {
        let mut sched = IntervalScheduler::new();
        let mut engine = TimerEngine::new();
        assert!(engine.start(&mut sched).is_some());
        assert!(engine.start(&mut sched).is_none());
        assert_eq!(sched.active(), 1);

        run_for(&mut engine, &mut sched, 1);
        assert_eq!(engine.seconds_left(), 1499);
        run_for(&mut engine, &mut sched, 3);
        assert_eq!(engine.seconds_left(), 1496);
    }

    #[test]
    fn no_tick_after_pause() {
        let mut sched = IntervalScheduler::new();
        let mut engine = TimerEngine::new();
        engine.start(&mut sched);
        run_for(&mut engine, &mut sched, 10);
        engine.pause(&mut sched);
        run_for(&mut engine, &mut sched, 10);
        assert_eq!(engine.seconds_left(), 1490);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut sched = IntervalScheduler::new();
        let mut engine = TimerEngine::new();
        engine.start(&mut sched);
        let old = engine.handle().unwrap();
        engine.pause(&mut sched);
        engine.start(&mut sched);
        assert_eq!(engine.tick(&mut sched, old), TickOutcome::Ignored);
        assert_eq!(engine.seconds_left(), 1500);
    }

    #[test]
    fn focus_expiry_switches_to_stopped_break() {
        let mut sched = IntervalScheduler::new();
        let mut engine = TimerEngine::new();
        engine.start(&mut sched);

        let outcomes = run_for(&mut engine, &mut sched, 1500);
        assert_eq!(
            outcomes.last(),
            Some(&TickOutcome::Expired {
                finished: TimerMode::Focus
            })
        );
        assert_eq!(outcomes.len(), 1500);
        assert_eq!(
            engine.state(),
            TimerState {
                mode: TimerMode::Break,
                seconds_left: 300,
                running: false
            }
        );
        assert_eq!(sched.active(), 0);

        // nothing more happens without an explicit start
        assert!(run_for(&mut engine, &mut sched, 60).is_empty());
    }

    #[test]
    fn break_expiry_switches_to_stopped_focus() {
        let mut sched = IntervalScheduler::new();
        let mut engine = TimerEngine::new();
        engine.set_mode(&mut sched, TimerMode::Break);
        engine.start(&mut sched);
        let outcomes = run_for(&mut engine, &mut sched, 300);
        assert_eq!(
            outcomes.last(),
            Some(&TickOutcome::Expired {
                finished: TimerMode::Break
            })
        );
        assert_eq!(engine.mode(), TimerMode::Focus);
        assert_eq!(engine.seconds_left(), 1500);
        assert!(!engine.is_running());
    }

    #[test]
    fn reset_refills_current_mode_and_stops() {
        let mut sched = IntervalScheduler::new();
        let mut engine = TimerEngine::new();
        engine.set_mode(&mut sched, TimerMode::Break);
        engine.start(&mut sched);
        run_for(&mut engine, &mut sched, 42);
        engine.reset(&mut sched);
        assert_eq!(
            engine.state(),
            TimerState {
                mode: TimerMode::Break,
                seconds_left: 300,
                running: false
            }
        );
        assert_eq!(sched.active(), 0);
    }

    #[test]
    fn set_mode_stops_running_timer() {
        let mut sched = IntervalScheduler::new();
        let mut engine = TimerEngine::new();
        engine.start(&mut sched);
        run_for(&mut engine, &mut sched, 5);
        let ev = engine.set_mode(&mut sched, TimerMode::Focus);
        assert!(matches!(ev, Event::ModeChanged { seconds_left: 1500, .. }));
        assert!(!engine.is_running());
        assert_eq!(sched.active(), 0);
    }

    #[test]
    fn restore_clamps_and_stops() {
        let engine = TimerEngine::restore(TimerState {
            mode: TimerMode::Break,
            seconds_left: 9999,
            running: true,
        });
        assert_eq!(engine.seconds_left(), 300);
        assert!(!engine.is_running());
    }

    #[test]
    fn restore_refills_a_zeroed_snapshot() {
        let engine = TimerEngine::restore(TimerState {
            mode: TimerMode::Focus,
            seconds_left: 0,
            running: false,
        });
        assert_eq!(engine.mode(), TimerMode::Focus);
        assert_eq!(engine.seconds_left(), 1500);
    }
}
