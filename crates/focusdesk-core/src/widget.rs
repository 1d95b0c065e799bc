//! The widget: one owner for all state.
//!
//! `Widget` holds the store, the timer engine and its scheduler, the task
//! list, the session counter and the assistant. Every mutating call writes
//! the affected state back to the store and then emits its [`Event`] to all
//! subscribers. Store failures are logged and otherwise ignored; nothing here
//! returns an error.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::assistant::{Assistant, Persona};
use crate::events::Event;
use crate::greeting;
use crate::plan;
use crate::quote::{load_quote, Quote, QuoteSource};
use crate::session::SessionCounter;
use crate::storage::{keys, load_json, save_json, KeyValueStore};
use crate::task::{IdGenerator, Task, TaskList, UuidIds};
use crate::timer::{
    format_clock, IntervalScheduler, Scheduler, TickHandle, TickOutcome, TimerEngine, TimerMode,
    TimerState,
};

type Listener = Box<dyn FnMut(&Event)>;

/// Everything a front-end needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    pub timer: TimerState,
    pub clock: String,
    pub label: String,
    pub focus_sessions: u64,
    pub tasks: Vec<Task>,
    pub completed_count: usize,
    pub assistant: Assistant,
    pub user_name: Option<String>,
    pub last_message: Option<String>,
}

pub struct Widget<S: KeyValueStore> {
    store: S,
    scheduler: IntervalScheduler,
    timer: TimerEngine,
    tasks: TaskList,
    sessions: SessionCounter,
    assistant: Assistant,
    ids: Box<dyn IdGenerator>,
    listeners: Vec<Listener>,
    last_message: Option<String>,
}

impl<S: KeyValueStore> Widget<S> {
    /// Load persisted state from `store`. Absent or malformed entries start
    /// from defaults.
    pub fn load(store: S, default_persona: Persona) -> Self {
        let timer = load_json::<TimerState>(&store, keys::TIMER)
            .map(TimerEngine::restore)
            .unwrap_or_default();
        let tasks = TaskList::load(&store);
        let sessions = SessionCounter::load(&store);
        let assistant = Assistant::load(&store, default_persona);
        tracing::debug!(
            tasks = tasks.len(),
            sessions = sessions.count(),
            mode = %timer.mode(),
            "widget state loaded"
        );
        Self {
            store,
            scheduler: IntervalScheduler::new(),
            timer,
            tasks,
            sessions,
            assistant,
            ids: Box::new(UuidIds),
            listeners: Vec::new(),
            last_message: None,
        }
    }

    /// Replace the task id source.
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Register a status-message observer.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn scheduler(&self) -> &IntervalScheduler {
        &self.scheduler
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn focus_sessions(&self) -> u64 {
        self.sessions.count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.completed_count()
    }

    pub fn assistant(&self) -> Assistant {
        self.assistant
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn user_name(&self) -> Option<String> {
        greeting::load_name(&self.store)
    }

    pub fn greeting(&self) -> String {
        greeting::greeting_now(self.user_name().as_deref())
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        let timer = self.timer.state();
        WidgetSnapshot {
            timer,
            clock: format_clock(timer.seconds_left),
            label: timer.mode.label().to_string(),
            focus_sessions: self.sessions.count(),
            tasks: self.tasks.tasks().to_vec(),
            completed_count: self.tasks.completed_count(),
            assistant: self.assistant,
            user_name: self.user_name(),
            last_message: self.last_message.clone(),
        }
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: TimerMode) {
        let event = self.timer.set_mode(&mut self.scheduler, mode);
        self.persist_timer();
        self.emit(event);
    }

    pub fn start_timer(&mut self) {
        if let Some(event) = self.timer.start(&mut self.scheduler) {
            self.persist_timer();
            self.emit(event);
        }
    }

    pub fn pause_timer(&mut self) {
        if let Some(event) = self.timer.pause(&mut self.scheduler) {
            self.persist_timer();
            self.emit(event);
        }
    }

    /// Start when stopped, pause when running.
    pub fn toggle_timer(&mut self) {
        if self.timer.is_running() {
            self.pause_timer();
        } else {
            self.start_timer();
        }
    }

    pub fn reset_timer(&mut self) {
        let event = self.timer.reset(&mut self.scheduler);
        self.persist_timer();
        self.emit(event);
    }

    /// Let `by` pass on the scheduler clock, delivering every tick that
    /// falls due in order.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now().saturating_add(by);
        while let Some(handle) = self.scheduler.pop_due(until) {
            self.deliver_tick(handle);
        }
        self.scheduler.advance_to(until);
    }

    fn deliver_tick(&mut self, handle: TickHandle) {
        match self.timer.tick(&mut self.scheduler, handle) {
            TickOutcome::Ignored => {
                tracing::debug!(handle = handle.id(), "dropping stale tick slot");
                self.scheduler.cancel(handle);
            }
            TickOutcome::Counting { .. } => self.persist_timer(),
            TickOutcome::Expired { finished } => {
                let done = match finished {
                    TimerMode::Focus => {
                        let total_sessions = self.sessions.increment();
                        self.persist_sessions();
                        Event::SessionCompleted {
                            total_sessions,
                            at: Utc::now(),
                        }
                    }
                    TimerMode::Break => Event::BreakCompleted { at: Utc::now() },
                };
                self.persist_timer();
                self.emit(done);
                let state = self.timer.state();
                self.emit(Event::ModeChanged {
                    mode: state.mode,
                    seconds_left: state.seconds_left,
                    at: Utc::now(),
                });
            }
        }
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Returns the new task's id, or `None` for blank text.
    pub fn add_task(&mut self, text: &str) -> Option<String> {
        let event = self.tasks.add(&mut *self.ids, text)?;
        let id = match &event {
            Event::TaskAdded { id, .. } => Some(id.clone()),
            _ => None,
        };
        self.persist_tasks();
        self.emit(event);
        id
    }

    /// Returns whether a task with `id` existed.
    pub fn toggle_task(&mut self, id: &str) -> bool {
        match self.tasks.toggle(id) {
            Some(event) => {
                self.persist_tasks();
                self.emit(event);
                true
            }
            None => false,
        }
    }

    /// Returns whether a task with `id` existed.
    pub fn delete_task(&mut self, id: &str) -> bool {
        match self.tasks.delete(id) {
            Some(event) => {
                self.persist_tasks();
                self.emit(event);
                true
            }
            None => false,
        }
    }

    pub fn clear_tasks(&mut self) {
        let event = self.tasks.clear_all();
        self.persist_tasks();
        self.emit(event);
    }

    /// Plan the next focus block from pending tasks and say it.
    pub fn plan(&mut self) -> String {
        let plan = plan::plan(self.tasks.iter());
        self.emit(Event::PlanSuggested {
            plan: plan.clone(),
            at: Utc::now(),
        });
        plan
    }

    // ── Assistant & greeting ─────────────────────────────────────────

    pub fn set_persona(&mut self, persona: Persona) {
        let event = self.assistant.set_persona(persona);
        self.persist_assistant();
        self.emit(event);
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.assistant.set_minimized(minimized);
        self.persist_assistant();
    }

    pub fn tip(&mut self) -> String {
        let event = self.assistant.tip(&mut rand::thread_rng());
        let message = event.message();
        self.emit(event);
        message
    }

    /// Title-case and save a display name. Blank input is ignored.
    pub fn save_name(&mut self, raw: &str) -> Option<String> {
        match greeting::save_name(&mut self.store, raw) {
            Ok(Some(name)) => {
                self.emit(Event::NameSaved {
                    name: name.clone(),
                    at: Utc::now(),
                });
                Some(name)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to save name");
                None
            }
        }
    }

    pub fn clear_name(&mut self) {
        if let Err(e) = greeting::clear_name(&mut self.store) {
            tracing::warn!(error = %e, "failed to clear name");
        }
        self.emit(Event::NameCleared { at: Utc::now() });
    }

    // ── Quote & full reset ───────────────────────────────────────────

    pub async fn refresh_quote<Q: QuoteSource>(&self, quotes: &Q) -> Quote {
        load_quote(quotes).await
    }

    /// Wipe tasks and the session count, put the timer back to a stopped
    /// full focus block. Persona and name are kept.
    pub fn reset_state(&mut self) {
        for key in [keys::TASKS, keys::FOCUS_SESSIONS] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove key during reset");
            }
        }
        self.tasks = TaskList::new();
        self.sessions = SessionCounter::new();

        let event = self.timer.set_mode(&mut self.scheduler, TimerMode::Focus);
        self.persist_timer();
        self.emit(event);
        self.emit(Event::ResetComplete { at: Utc::now() });
    }

    /// [`reset_state`](Self::reset_state) followed by a fresh quote.
    pub async fn reset_all<Q: QuoteSource>(&mut self, quotes: &Q) -> Quote {
        self.reset_state();
        self.refresh_quote(quotes).await
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn emit(&mut self, event: Event) {
        let message = event.message();
        tracing::debug!(%message, "status");
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.last_message = Some(message);
    }

    fn persist_timer(&mut self) {
        if let Err(e) = save_json(&mut self.store, keys::TIMER, &self.timer.state()) {
            tracing::warn!(error = %e, "failed to persist timer");
        }
    }

    fn persist_tasks(&mut self) {
        if let Err(e) = self.tasks.save(&mut self.store) {
            tracing::warn!(error = %e, "failed to persist tasks");
        }
    }

    fn persist_sessions(&mut self) {
        if let Err(e) = self.sessions.save(&mut self.store) {
            tracing::warn!(error = %e, "failed to persist session count");
        }
    }

    fn persist_assistant(&mut self) {
        if let Err(e) = self.assistant.save(&mut self.store) {
            tracing::warn!(error = %e, "failed to persist assistant");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryStore;
    use crate::task::SequentialIds;

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Locked)
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Locked)
        }
    }

    #[test]
    fn store_failures_do_not_stop_the_widget() {
        let mut w = Widget::load(ReadOnlyStore, Persona::Cosmo).with_ids(SequentialIds::default());
        assert!(w.add_task("still works").is_some());
        w.start_timer();
        w.advance(Duration::from_secs(3));
        assert_eq!(w.timer().seconds_left(), 1497);
        w.reset_state();
        assert!(w.tasks().is_empty());
    }

    #[test]
    fn timer_state_survives_reload_stopped() {
        let mut w = Widget::load(MemoryStore::new(), Persona::Cosmo);
        w.set_mode(TimerMode::Break);
        w.start_timer();
        w.advance(Duration::from_secs(30));

        let w = Widget::load(w.into_store(), Persona::Cosmo);
        assert_eq!(
            w.timer().state(),
            TimerState {
                mode: TimerMode::Break,
                seconds_left: 270,
                running: false
            }
        );
    }

    #[test]
    fn toggle_timer_alternates() {
        let mut w = Widget::load(MemoryStore::new(), Persona::Cosmo);
        w.toggle_timer();
        assert!(w.timer().is_running());
        w.toggle_timer();
        assert!(!w.timer().is_running());
        assert_eq!(w.last_message(), Some("Paused. We continue when you’re ready."));
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut w = Widget::load(MemoryStore::new(), Persona::Astra).with_ids(SequentialIds::default());
        w.add_task("write");
        w.toggle_task("task-1");
        let snap = w.snapshot();
        assert_eq!(snap.clock, "25:00");
        assert_eq!(snap.label, "Study time.");
        assert_eq!(snap.completed_count, 1);
        assert_eq!(snap.assistant.persona, Persona::Astra);
        assert_eq!(snap.last_message.as_deref(), Some("Nice ✅ One down."));
    }
}
