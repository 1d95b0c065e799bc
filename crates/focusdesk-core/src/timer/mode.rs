use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two countdown modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Focus,
    Break,
}

impl TimerMode {
    /// Nominal duration of the mode in seconds.
    pub const fn duration_secs(self) -> u32 {
        match self {
            TimerMode::Focus => 25 * 60,
            TimerMode::Break => 5 * 60,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            TimerMode::Focus => TimerMode::Break,
            TimerMode::Break => TimerMode::Focus,
        }
    }

    /// Caption shown under the clock.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Study time.",
            TimerMode::Break => "Break time.",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerMode::Focus => f.write_str("focus"),
            TimerMode::Break => f.write_str("break"),
        }
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" | "pomodoro" => Ok(TimerMode::Focus),
            "break" => Ok(TimerMode::Break),
            other => Err(format!("unknown timer mode '{other}' (expected focus or break)")),
        }
    }
}

/// `MM:SS`, zero padded. Minutes are not wrapped at 60.
pub fn format_clock(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
