mod engine;
mod mode;
mod scheduler;

pub use engine::{TickOutcome, TimerEngine, TimerState};
pub use mode::{format_clock, TimerMode};
pub use scheduler::{IntervalScheduler, Scheduler, TickHandle, TICK_INTERVAL};
