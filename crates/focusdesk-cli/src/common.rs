//! Shared plumbing for CLI commands.

use focusdesk_core::storage::Database;
use focusdesk_core::{Config, Widget};

pub type CliResult = focusdesk_core::Result<()>;

/// Open the on-disk widget and echo every status message to stdout.
pub fn open_widget(config: &Config) -> focusdesk_core::Result<Widget<Database>> {
    let db = Database::open()?;
    tracing::debug!(persona = %config.assistant.default_persona, "widget store opened");
    let mut widget = Widget::load(db, config.assistant.default_persona);
    widget.subscribe(|event| println!("{}", event.message()));
    Ok(widget)
}

/// Single-threaded runtime for the few commands that touch the network or
/// wait on the clock.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
