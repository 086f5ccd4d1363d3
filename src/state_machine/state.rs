//! Session state types

use super::effect::Effect;
use crate::engine::{KeywordRules, Mood, PromptComposer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One user message paired with the reply recorded for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user_text: String,
    pub bot_text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(
        user_text: impl Into<String>,
        bot_text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_text: user_text.into(),
            bot_text: bot_text.into(),
            created_at,
        }
    }
}

/// Lifecycle of a session
///
/// `NotStarted -> CollectingProfile -> Chatting`, with `AwaitingReply` as the
/// in-flight sub-state of `Chatting` while the provider call runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    NotStarted,
    CollectingProfile,
    Chatting,
    AwaitingReply {
        pending_text: String,
        received_at: DateTime<Utc>,
    },
}

impl SessionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::AwaitingReply { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not_started",
            SessionState::CollectingProfile => "collecting_profile",
            SessionState::Chatting => "chatting",
            SessionState::AwaitingReply { .. } => "awaiting_reply",
        }
    }
}

/// Per-browser-session conversation data. Lives in process memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_name: Option<String>,
    pub mood: Mood,
    pub transcript: Vec<Turn>,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_name: None,
            mood: Mood::Neutral,
            transcript: Vec::new(),
            state: SessionState::NotStarted,
            created_at: Utc::now(),
        }
    }

    /// Name used in the chat header
    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Teman")
    }

    pub fn header(&self) -> String {
        format!(
            "🧠 Mental Health Buddy • {} • Mood: {}",
            self.display_name(),
            self.mood.label()
        )
    }

    /// Apply a data effect to the session.
    ///
    /// `RequestCompletion` is not applied here; its prompt is handed back
    /// for the runtime to send.
    pub fn apply(&mut self, effect: Effect) -> Option<String> {
        match effect {
            Effect::UpdateMood { mood, .. } => self.mood = mood,
            Effect::SetUserName { name } => self.user_name = name,
            Effect::RecordTurn { turn, .. } => self.transcript.push(turn),
            Effect::ClearTranscript => self.transcript.clear(),
            Effect::RequestCompletion { prompt } => return Some(prompt),
        }
        None
    }
}

/// Immutable inputs to the transition function
#[derive(Debug, Clone)]
pub struct ConvContext {
    pub rules: Arc<KeywordRules>,
    pub composer: PromptComposer,
}

impl ConvContext {
    pub fn new(rules: Arc<KeywordRules>, composer: PromptComposer) -> Self {
        Self { rules, composer }
    }
}

impl Default for ConvContext {
    fn default() -> Self {
        Self::new(Arc::new(KeywordRules::default()), PromptComposer::default())
    }
}

/// Trim a user-supplied name; blank means no name
pub fn normalize_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new("abc");
        assert_eq!(session.state, SessionState::NotStarted);
        assert_eq!(session.mood, Mood::Neutral);
        assert!(session.transcript.is_empty());
        assert_eq!(session.header(), "🧠 Mental Health Buddy • Teman • Mood: Netral");
    }

    #[test]
    fn test_header_uses_name_and_mood() {
        let mut session = Session::new("abc");
        session.user_name = Some("Rina".to_string());
        session.mood = Mood::Happy;
        assert_eq!(session.header(), "🧠 Mental Health Buddy • Rina • Mood: Senang");
    }

    #[test]
    fn test_apply_effects() {
        let mut session = Session::new("abc");
        let turn = Turn::new("halo", "hai", Utc::now());

        assert_eq!(session.apply(Effect::record_turn(turn.clone())), None);
        assert_eq!(session.apply(Effect::mood_from_user(Mood::Angry)), None);
        assert_eq!(
            session.apply(Effect::SetUserName {
                name: Some("Budi".to_string())
            }),
            None
        );
        assert_eq!(session.transcript, vec![turn]);
        assert_eq!(session.mood, Mood::Angry);

        let prompt = session.apply(Effect::RequestCompletion {
            prompt: "User: x\nAssistant:".to_string(),
        });
        assert_eq!(prompt.as_deref(), Some("User: x\nAssistant:"));

        session.apply(Effect::ClearTranscript);
        assert!(session.transcript.is_empty());
        assert_eq!(session.user_name.as_deref(), Some("Budi"));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name(Some("  Budi ")), Some("Budi".to_string()));
        assert_eq!(normalize_name(Some("   ")), None);
        assert_eq!(normalize_name(None), None);
    }

    #[test]
    fn test_state_serializes_tagged() {
        let json = serde_json::to_value(SessionState::CollectingProfile).unwrap();
        assert_eq!(json, serde_json::json!({"type": "collecting_profile"}));
    }
}
