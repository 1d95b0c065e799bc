use clap::Subcommand;
use focusdesk_core::Config;

use crate::common::{open_widget, CliResult};

#[derive(Subcommand)]
pub enum NameAction {
    /// Save a display name
    Set {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Forget the display name
    Clear,
    /// Print the greeting for the current time
    Greet,
}

pub fn run(action: NameAction) -> CliResult {
    let config = Config::load_or_default();
    let mut widget = open_widget(&config)?;

    match action {
        NameAction::Set { name } => {
            if widget.save_name(&name.join(" ")).is_none() {
                println!("Nothing to save.");
            }
        }
        NameAction::Clear => widget.clear_name(),
        NameAction::Greet => println!("{}", widget.greeting()),
    }
    Ok(())
}
