//! Effects produced by state transitions

use crate::engine::Mood;
use crate::state_machine::state::Turn;

/// Why the mood changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodSource {
    Sentiment,
    User,
    Reset,
}

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the session mood
    UpdateMood { mood: Mood, source: MoodSource },

    /// Replace the user name (`None` clears it)
    SetUserName { name: Option<String> },

    /// Append a finished turn to the transcript
    RecordTurn { turn: Turn, emergency: bool },

    /// Empty the transcript
    ClearTranscript,

    /// Send the composed prompt to the completion provider
    RequestCompletion { prompt: String },
}

impl Effect {
    pub fn mood_from_sentiment(mood: Mood) -> Self {
        Effect::UpdateMood {
            mood,
            source: MoodSource::Sentiment,
        }
    }

    pub fn mood_from_user(mood: Mood) -> Self {
        Effect::UpdateMood {
            mood,
            source: MoodSource::User,
        }
    }

    pub fn record_turn(turn: Turn) -> Self {
        Effect::RecordTurn {
            turn,
            emergency: false,
        }
    }

    pub fn record_emergency_turn(turn: Turn) -> Self {
        Effect::RecordTurn {
            turn,
            emergency: true,
        }
    }
}
