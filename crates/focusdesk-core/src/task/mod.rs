//! To-do list.
//!
//! Tasks are kept most-recent-first. Lookups by id that miss are no-ops,
//! as is adding blank text; none of the list operations can fail.

mod ids;

pub use ids::{IdGenerator, SequentialIds, UuidIds};

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::events::Event;
use crate::storage::{keys, load_json, save_json, KeyValueStore};

/// Give up on an id generator that keeps handing out taken ids.
const MAX_ID_ATTEMPTS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// Ordered task collection with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from untrusted records. Blank tasks and repeated ids (after the
    /// first occurrence) are dropped; order is otherwise kept.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::new();
        let tasks = tasks
            .into_iter()
            .filter_map(|mut t| {
                let trimmed = t.text.trim();
                if trimmed.is_empty() || !seen.insert(t.id.clone()) {
                    return None;
                }
                if trimmed.len() != t.text.len() {
                    t.text = trimmed.to_string();
                }
                Some(t)
            })
            .collect();
        Self { tasks }
    }

    /// Load from the `tasks` key; anything unreadable yields an empty list.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        load_json::<Vec<Task>>(store, keys::TASKS)
            .map(Self::from_tasks)
            .unwrap_or_default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        save_json(store, keys::TASKS, &self.tasks)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// Tasks with `done == false`, in list order.
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.done)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Prepend a new pending task. `None` when `text` is blank.
    pub fn add(&mut self, ids: &mut dyn IdGenerator, text: &str) -> Option<Event> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = (0..MAX_ID_ATTEMPTS)
            .map(|_| ids.next_id())
            .find(|candidate| self.get(candidate).is_none());
        let Some(id) = id else {
            tracing::warn!("id generator produced no unused id, task dropped");
            return None;
        };

        self.tasks.insert(
            0,
            Task {
                id: id.clone(),
                text: text.to_string(),
                done: false,
            },
        );
        Some(Event::TaskAdded {
            id,
            text: text.to_string(),
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self, id: &str) -> Option<Event> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.done = !task.done;
        Some(Event::TaskToggled {
            id: task.id.clone(),
            done: task.done,
            at: Utc::now(),
        })
    }

    pub fn delete(&mut self, id: &str) -> Option<Event> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(index);
        Some(Event::TaskDeleted {
            id: removed.id,
            at: Utc::now(),
        })
    }

    pub fn clear_all(&mut self) -> Event {
        let removed = self.tasks.len();
        self.tasks.clear();
        Event::TasksCleared {
            removed,
            at: Utc::now(),
        }
    }
}
