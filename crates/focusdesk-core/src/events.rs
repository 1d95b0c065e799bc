use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assistant::Persona;
use crate::timer::TimerMode;

/// Every state change in the widget produces an Event.
///
/// The assistant speech bubble is the only consumer in the original UI;
/// [`Event::message`] renders the line it shows. Nothing parses the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    ModeChanged {
        mode: TimerMode,
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    /// A focus countdown reached zero.
    SessionCompleted {
        total_sessions: u64,
        at: DateTime<Utc>,
    },
    /// A break countdown reached zero.
    BreakCompleted {
        at: DateTime<Utc>,
    },
    TaskAdded {
        id: String,
        text: String,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: String,
        done: bool,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    TasksCleared {
        removed: usize,
        at: DateTime<Utc>,
    },
    PlanSuggested {
        plan: String,
        at: DateTime<Utc>,
    },
    PersonaChanged {
        persona: Persona,
        at: DateTime<Utc>,
    },
    AssistantTip {
        persona: Persona,
        tip: String,
        at: DateTime<Utc>,
    },
    NameSaved {
        name: String,
        at: DateTime<Utc>,
    },
    NameCleared {
        at: DateTime<Utc>,
    },
    ResetComplete {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Human-readable status line for the assistant bubble.
    pub fn message(&self) -> String {
        match self {
            Event::TimerStarted { .. } => "Timer started. Lock in.".into(),
            Event::TimerPaused { .. } => "Paused. We continue when you’re ready.".into(),
            Event::TimerReset { .. } => "Timer reset. Fresh start.".into(),
            Event::ModeChanged { mode, .. } => match mode {
                TimerMode::Focus => "Focus mode. Pick ONE task and start.".into(),
                TimerMode::Break => "Break mode. Water + breathe. Don’t scroll.".into(),
            },
            Event::SessionCompleted { .. } => "Session complete ✅ That was a real rep.".into(),
            Event::BreakCompleted { .. } => "Break complete. Back to focus.".into(),
            Event::TaskAdded { .. } => "Task added. Want me to plan your next 25?".into(),
            Event::TaskToggled { done: true, .. } => "Nice ✅ One down.".into(),
            Event::TaskToggled { done: false, .. } => "Okay—back on the list.".into(),
            Event::TaskDeleted { .. } => "Deleted. Keep it clean.".into(),
            Event::TasksCleared { .. } => "Tasks cleared. Start small: 3 tasks max.".into(),
            Event::PlanSuggested { plan, .. } => plan.clone(),
            Event::PersonaChanged { persona, .. } => persona.intro().into(),
            Event::AssistantTip { tip, .. } => tip.clone(),
            Event::NameSaved { .. } => "Nice. Personalized ✅".into(),
            Event::NameCleared { .. } => "Name cleared. Save a nickname anytime.".into(),
            Event::ResetComplete { .. } => "Reset complete. Clean slate.".into(),
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at, .. }
            | Event::ModeChanged { at, .. }
            | Event::SessionCompleted { at, .. }
            | Event::BreakCompleted { at }
            | Event::TaskAdded { at, .. }
            | Event::TaskToggled { at, .. }
            | Event::TaskDeleted { at, .. }
            | Event::TasksCleared { at, .. }
            | Event::PlanSuggested { at, .. }
            | Event::PersonaChanged { at, .. }
            | Event::AssistantTip { at, .. }
            | Event::NameSaved { at, .. }
            | Event::NameCleared { at }
            | Event::ResetComplete { at } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_change_message_depends_on_mode() {
        let focus = Event::ModeChanged {
            mode: TimerMode::Focus,
            seconds_left: 1500,
            at: Utc::now(),
        };
        let brk = Event::ModeChanged {
            mode: TimerMode::Break,
            seconds_left: 300,
            at: Utc::now(),
        };
        assert!(focus.message().starts_with("Focus mode"));
        assert!(brk.message().starts_with("Break mode"));
    }

    #[test]
    fn serializes_with_type_tag() {
        let ev = Event::TasksCleared {
            removed: 2,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "tasks_cleared");
        assert_eq!(json["removed"], 2);
    }
}
