//! API request and response types

use crate::engine::Mood;
use crate::state_machine::{Session, Turn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile form submission
#[derive(Debug, Default, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

/// Direct mood selection; accepts `happy` or `senang` style values
#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub mood: String,
}

/// Name change; `null` or blank clears it
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Serializable view of a session for the UI
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub state: &'static str,
    pub user_name: Option<String>,
    pub display_name: String,
    pub mood: Mood,
    pub mood_label: &'static str,
    pub header: String,
    pub turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            state: session.state.name(),
            user_name: session.user_name.clone(),
            display_name: session.display_name().to_string(),
            mood: session.mood,
            mood_label: session.mood.label(),
            header: session.header(),
            turns: session.transcript.clone(),
            created_at: session.created_at,
        }
    }
}

/// Response for a chat turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub emergency: bool,
    pub mood: Mood,
    pub session: SessionView,
}

/// Response for closing a session
#[derive(Debug, Serialize)]
pub struct CloseResponse {
    pub closed: bool,
}

/// Model in use
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub description: Option<&'static str>,
    pub context_window: Option<usize>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
