//! # FocusDesk Core Library
//!
//! Business logic for the FocusDesk productivity widget: a focus/break
//! countdown, a small to-do list, a session counter, a persona-driven
//! assistant and a quote of the day. Front-ends (the `focusdesk` CLI) are
//! thin layers over [`Widget`].
//!
//! ## Architecture
//!
//! - **Timer Engine**: a two-mode countdown that registers one repeating slot
//!   with an injectable [`Scheduler`] and is ticked by whoever owns it
//! - **Tasks**: an ordered list with unique ids, most recent first
//! - **Storage**: every piece of state is a string under a well-known key in a
//!   [`KeyValueStore`]; SQLite for the CLI, in-memory for tests
//! - **Quote**: best-effort HTTP fetch with a fixed fallback
//!
//! ## Key Components
//!
//! - [`Widget`]: owns all state, persists on every mutation, emits [`Event`]s
//! - [`TimerEngine`]: countdown state machine
//! - [`TaskList`]: to-do list
//! - [`Config`]: application configuration

pub mod assistant;
pub mod error;
pub mod events;
pub mod greeting;
pub mod plan;
pub mod quote;
pub mod session;
pub mod storage;
pub mod task;
pub mod timer;
pub mod widget;

pub use assistant::{Assistant, Persona};
pub use error::{ConfigError, CoreError, QuoteError, Result, StoreError};
pub use events::Event;
pub use plan::plan;
pub use quote::{load_quote, HttpQuoteSource, Quote, QuoteSource};
pub use session::SessionCounter;
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use task::{IdGenerator, SequentialIds, Task, TaskList, UuidIds};
pub use timer::{IntervalScheduler, Scheduler, TickHandle, TimerEngine, TimerMode, TimerState};
pub use widget::{Widget, WidgetSnapshot};
