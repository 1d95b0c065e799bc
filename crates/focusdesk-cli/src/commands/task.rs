//! Task management commands for CLI.

use clap::Subcommand;
use focusdesk_core::Config;

use crate::common::{open_widget, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the top of the list
    Add {
        /// Task text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Flip a task between done and pending
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Delete every task
    Clear,
    /// List tasks as JSON
    List {
        /// Only tasks that are not done
        #[arg(long)]
        pending: bool,
    },
    /// Suggest how to spend the next focus block
    Plan,
}

pub fn run(action: TaskAction) -> CliResult {
    let config = Config::load_or_default();
    let mut widget = open_widget(&config)?;

    match action {
        TaskAction::Add { text } => {
            let text = text.join(" ");
            match widget.add_task(&text) {
                Some(id) => println!("{id}"),
                None => println!("Nothing to add."),
            }
        }
        TaskAction::Toggle { id } => {
            if !widget.toggle_task(&id) {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Delete { id } => {
            if !widget.delete_task(&id) {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Clear => widget.clear_tasks(),
        TaskAction::List { pending } => {
            let tasks: Vec<_> = widget
                .tasks()
                .iter()
                .filter(|t| !pending || !t.done)
                .collect();
            print_json(&tasks)?;
            eprintln!(
                "{} of {} done",
                widget.completed_count(),
                widget.tasks().len()
            );
        }
        TaskAction::Plan => {
            widget.plan();
        }
    }
    Ok(())
}
