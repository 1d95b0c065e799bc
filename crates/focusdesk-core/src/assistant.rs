//! Assistant persona.
//!
//! Two personas share the same duties and differ only in tone. The chosen
//! persona and whether its panel is minimized are persisted.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::events::Event;
use crate::storage::{keys, KeyValueStore};

const COSMO_TIPS: [&str; 4] = [
    "Pick one task. Make it tiny. Start 2 minutes. Momentum does the rest.",
    "Close tabs. Your brain isn’t a RAM upgrade.",
    "Overwhelmed? Write 3 bullets. That’s the plan.",
    "Consistency beats intensity. Every time.",
];

const ASTRA_TIPS: [&str; 4] = [
    "No negotiating with distractions. Start the timer.",
    "Hardest task first. That’s how you buy peace.",
    "Perfect is a delay tactic. Ship it.",
    "You don’t need motivation. You need a decision.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Persona {
    #[default]
    Cosmo,
    Astra,
}

impl Persona {
    pub fn name(self) -> &'static str {
        match self {
            Persona::Cosmo => "Cosmo",
            Persona::Astra => "Astra",
        }
    }

    pub fn mood(self) -> &'static str {
        match self {
            Persona::Cosmo => "calm mode",
            Persona::Astra => "boss mode",
        }
    }

    pub fn intro(self) -> &'static str {
        match self {
            Persona::Cosmo => "Cosmo here. Soft focus, sharp results. What are we doing first?",
            Persona::Astra => "Astra here. We execute. Pick one task. Start now.",
        }
    }

    pub fn tips(self) -> &'static [&'static str] {
        match self {
            Persona::Cosmo => &COSMO_TIPS,
            Persona::Astra => &ASTRA_TIPS,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosmo" => Ok(Persona::Cosmo),
            "astra" => Ok(Persona::Astra),
            other => Err(format!("unknown persona '{other}' (expected cosmo or astra)")),
        }
    }
}

/// Persona choice plus panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assistant {
    pub persona: Persona,
    pub minimized: bool,
}

impl Assistant {
    /// Read persisted choices, falling back to `default_persona` when none is
    /// stored or the stored name is unrecognised.
    pub fn load(store: &dyn KeyValueStore, default_persona: Persona) -> Self {
        let persona = match store.get(keys::ASSISTANT) {
            Ok(Some(name)) => name.parse().unwrap_or(default_persona),
            Ok(None) => default_persona,
            Err(e) => {
                tracing::warn!(error = %e, "assistant persona unreadable");
                default_persona
            }
        };
        let minimized = matches!(store.get(keys::ASSISTANT_MIN), Ok(Some(v)) if v == "1");
        Self { persona, minimized }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(keys::ASSISTANT, self.persona.name())?;
        store.set(keys::ASSISTANT_MIN, if self.minimized { "1" } else { "0" })
    }

    pub fn set_persona(&mut self, persona: Persona) -> Event {
        self.persona = persona;
        Event::PersonaChanged {
            persona,
            at: Utc::now(),
        }
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    /// A random line from the current persona's pool.
    pub fn tip<R: Rng + ?Sized>(&self, rng: &mut R) -> Event {
        let tip = self
            .persona
            .tips()
            .choose(rng)
            .copied()
            .unwrap_or_else(|| self.persona.intro());
        Event::AssistantTip {
            persona: self.persona,
            tip: tip.to_string(),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rand::rngs::mock::StepRng;

    #[test]
    fn unknown_stored_name_falls_back() {
        let mut store = MemoryStore::new();
        store.set(keys::ASSISTANT, "Zed").unwrap();
        let a = Assistant::load(&store, Persona::Astra);
        assert_eq!(a.persona, Persona::Astra);
        assert!(!a.minimized);
    }

    #[test]
    fn save_uses_original_encoding() {
        let mut store = MemoryStore::new();
        let mut a = Assistant::default();
        a.set_persona(Persona::Astra);
        a.set_minimized(true);
        a.save(&mut store).unwrap();
        assert_eq!(store.get(keys::ASSISTANT).unwrap().as_deref(), Some("Astra"));
        assert_eq!(store.get(keys::ASSISTANT_MIN).unwrap().as_deref(), Some("1"));
        assert_eq!(Assistant::load(&store, Persona::Cosmo), a);
    }

    #[test]
    fn tip_comes_from_persona_pool() {
        let mut rng = StepRng::new(0, 1);
        let a = Assistant {
            persona: Persona::Astra,
            minimized: false,
        };
        match a.tip(&mut rng) {
            Event::AssistantTip { tip, persona, .. } => {
                assert_eq!(persona, Persona::Astra);
                assert!(ASTRA_TIPS.contains(&tip.as_str()));
            }
            other => panic!("Expected AssistantTip, got {other:?}"),
        }
    }

    #[test]
    fn persona_change_speaks_intro() {
        let mut a = Assistant::default();
        let ev = a.set_persona(Persona::Cosmo);
        assert_eq!(ev.message(), Persona::Cosmo.intro());
    }
}
