//! Events that drive a session

use crate::engine::Mood;
use chrono::{DateTime, Utc};

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Profile events
    Start,
    SubmitProfile {
        name: Option<String>,
        mood: Option<Mood>,
    },
    SetMood {
        mood: Mood,
    },
    SetName {
        name: Option<String>,
    },

    // Chat events
    UserMessage {
        text: String,
        received_at: DateTime<Utc>,
    },
    CompletionSucceeded {
        text: String,
    },
    CompletionFailed {
        message: String,
    },

    Reset,
}

impl Event {
    pub fn user_message(text: impl Into<String>) -> Self {
        Event::UserMessage {
            text: text.into(),
            received_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::SubmitProfile { .. } => "submit_profile",
            Event::SetMood { .. } => "set_mood",
            Event::SetName { .. } => "set_name",
            Event::UserMessage { .. } => "user_message",
            Event::CompletionSucceeded { .. } => "completion_succeeded",
            Event::CompletionFailed { .. } => "completion_failed",
            Event::Reset => "reset",
        }
    }
}
