//! Pure state transition function
//!
//! Given the same session, context and event it always returns the same
//! result. Timestamps arrive inside events, so no clock is read here.

use super::state::{normalize_name, Turn};
use super::{ConvContext, Effect, Event, Session, SessionState};
use crate::engine::{analyze_sentiment, apology_message, detect_emergency, Mood};
use crate::state_machine::MoodSource;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Still replying to the previous message")]
    SessionBusy,
    #[error("Session is not chatting yet (start it and submit a profile first)")]
    NotChatting,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub fn transition(
    session: &Session,
    context: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    let state = &session.state;

    match (state, event) {
        // ============================================================
        // In-flight provider call
        // ============================================================
        (
            SessionState::AwaitingReply {
                pending_text,
                received_at,
            },
            Event::CompletionSucceeded { text },
        ) => {
            let turn = Turn::new(pending_text.clone(), text.trim(), *received_at);
            Ok(TransitionResult::new(SessionState::Chatting).with_effect(Effect::record_turn(turn)))
        }

        (
            SessionState::AwaitingReply {
                pending_text,
                received_at,
            },
            Event::CompletionFailed { message },
        ) => {
            let turn = Turn::new(pending_text.clone(), apology_message(&message), *received_at);
            Ok(TransitionResult::new(SessionState::Chatting).with_effect(Effect::record_turn(turn)))
        }

        (SessionState::AwaitingReply { .. }, _) => Err(TransitionError::SessionBusy),

        (_, event @ (Event::CompletionSucceeded { .. } | Event::CompletionFailed { .. })) => {
            Err(TransitionError::InvalidTransition(format!(
                "{} while {}",
                event.name(),
                state.name()
            )))
        }

        // ============================================================
        // Profile collection
        // ============================================================
        (SessionState::NotStarted, Event::Start) => {
            Ok(TransitionResult::new(SessionState::CollectingProfile))
        }

        (SessionState::CollectingProfile, Event::SubmitProfile { name, mood }) => {
            Ok(TransitionResult::new(SessionState::Chatting)
                .with_effect(Effect::SetUserName {
                    name: normalize_name(name.as_deref()),
                })
                .with_effects(mood.map(Effect::mood_from_user)))
        }

        // Sidebar controls work in every non-busy state
        (_, Event::SetMood { mood }) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::mood_from_user(mood)))
        }

        (_, Event::SetName { name }) => Ok(TransitionResult::new(state.clone()).with_effect(
            Effect::SetUserName {
                name: normalize_name(name.as_deref()),
            },
        )),

        // ============================================================
        // Chat turns
        // ============================================================
        (SessionState::Chatting, Event::UserMessage { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyMessage)
        }

        (SessionState::Chatting, Event::UserMessage { text, received_at }) => {
            // Triage is checked first and is final
            if detect_emergency(&text, &context.rules) {
                let turn = Turn::new(text, context.rules.safety_message.clone(), received_at);
                return Ok(TransitionResult::new(SessionState::Chatting)
                    .with_effect(Effect::record_emergency_turn(turn)));
            }

            let mood = Mood::from(analyze_sentiment(&text, &context.rules));
            let prompt = context.composer.compose(
                &session.transcript,
                &text,
                mood,
                session.user_name.as_deref(),
            );

            Ok(TransitionResult::new(SessionState::AwaitingReply {
                pending_text: text,
                received_at,
            })
            .with_effect(Effect::mood_from_sentiment(mood))
            .with_effect(Effect::RequestCompletion { prompt }))
        }

        (_, Event::UserMessage { .. }) => Err(TransitionError::NotChatting),

        // ============================================================
        // Reset
        // ============================================================
        (_, Event::Reset) => Ok(TransitionResult::new(SessionState::NotStarted)
            .with_effect(Effect::ClearTranscript)
            .with_effect(Effect::UpdateMood {
                mood: Mood::Neutral,
                source: MoodSource::Reset,
            })),

        (_, event) => Err(TransitionError::InvalidTransition(format!(
            "{} while {}",
            event.name(),
            state.name()
        ))),
    }
}
