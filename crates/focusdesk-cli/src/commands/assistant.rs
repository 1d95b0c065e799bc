use clap::Subcommand;
use focusdesk_core::{Config, Persona};

use crate::common::{open_widget, print_json, CliResult};

#[derive(Subcommand)]
pub enum AssistantAction {
    /// Switch persona (cosmo or astra)
    Use {
        persona: Persona,
    },
    /// Ask for a tip
    Tip,
    /// Collapse the assistant panel
    Minimize,
    /// Expand the assistant panel
    Restore,
    /// Print persona and panel state as JSON
    Show,
}

pub fn run(action: AssistantAction) -> CliResult {
    let config = Config::load_or_default();
    let mut widget = open_widget(&config)?;

    match action {
        AssistantAction::Use { persona } => widget.set_persona(persona),
        AssistantAction::Tip => {
            widget.tip();
        }
        AssistantAction::Minimize => widget.set_minimized(true),
        AssistantAction::Restore => widget.set_minimized(false),
        AssistantAction::Show => {
            let assistant = widget.assistant();
            print_json(&serde_json::json!({
                "persona": assistant.persona,
                "mood": assistant.persona.mood(),
                "minimized": assistant.minimized,
            }))?;
        }
    }
    Ok(())
}
