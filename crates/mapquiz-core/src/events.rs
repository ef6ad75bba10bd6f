use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in a game produces an Event.
/// Hosts may log them, print them or ignore them; the game never reads
/// them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A region became the focused selection.
    RegionFocused {
        region_id: String,
        /// Region that lost focus, if any.
        previous: Option<String>,
        /// True only for the selection that started the game.
        first_selection: bool,
        at: DateTime<Utc>,
    },
    GuessAccepted {
        region_id: String,
        guess: String,
        score: u32,
        /// Score reached `max_score` with this guess.
        completed: bool,
        at: DateTime<Utc>,
    },
    GuessRejected {
        region_id: String,
        guess: String,
        at: DateTime<Utc>,
    },
    TimerStarted {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short machine-readable name, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::RegionFocused { .. } => "region_focused",
            Event::GuessAccepted { .. } => "guess_accepted",
            Event::GuessRejected { .. } => "guess_rejected",
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerStopped { .. } => "timer_stopped",
            Event::TimerReset { .. } => "timer_reset",
        }
    }
}
