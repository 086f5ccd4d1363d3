//! Session executor
//!
//! Runs events through the pure transition function and applies the
//! resulting effects to the session. The provider call is a separate step
//! whose result is fed back in as an event, so the session does not need to
//! stay locked while the model is thinking.

use super::traits::CompletionClient;
use crate::state_machine::{
    transition, ConvContext, Effect, Event, MoodSource, Session, TransitionError, Turn,
};
use std::time::Duration;
use tokio::time::timeout;

/// Turn recorded while dispatching an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTurn {
    pub turn: Turn,
    pub emergency: bool,
}

/// What a dispatched event produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub recorded: Option<RecordedTurn>,
    pub provider_called: bool,
}

/// Executes session events against a completion client
pub struct SessionRuntime<C: CompletionClient> {
    context: ConvContext,
    client: C,
    completion_timeout: Duration,
}

impl<C: CompletionClient> SessionRuntime<C> {
    pub fn new(context: ConvContext, client: C, completion_timeout: Duration) -> Self {
        Self {
            context,
            client,
            completion_timeout,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run `event` and any follow-up events to completion on a session the
    /// caller owns outright.
    ///
    /// Provider failures never surface here; they become the bot text of
    /// the turn. Only rejected transitions are errors.
    #[cfg(test)]
    pub async fn dispatch(
        &self,
        session: &mut Session,
        event: Event,
    ) -> Result<DispatchOutcome, TransitionError> {
        let mut outcome = DispatchOutcome::default();
        let mut next = Some(event);

        while let Some(event) = next.take() {
            if let Some(prompt) = self.step(session, event, &mut outcome)? {
                next = Some(self.request_completion(&session.id, &prompt).await);
            }
        }

        Ok(outcome)
    }

    /// Run one event through `transition` and apply its effects.
    ///
    /// Returns the prompt when the session now waits on the provider. The
    /// caller performs that call and feeds the result back in as an event.
    pub fn step(
        &self,
        session: &mut Session,
        event: Event,
        outcome: &mut DispatchOutcome,
    ) -> Result<Option<String>, TransitionError> {
        let event_name = event.name();
        let result = transition(session, &self.context, event).inspect_err(|e| {
            tracing::debug!(
                session_id = %session.id,
                event = event_name,
                state = session.state.name(),
                error = %e,
                "Event rejected"
            );
        })?;

        tracing::debug!(
            session_id = %session.id,
            event = event_name,
            from = session.state.name(),
            to = result.new_state.name(),
            "Session transition"
        );
        session.state = result.new_state;

        let mut pending = None;
        for effect in result.effects {
            self.observe(session, &effect, outcome);
            if let Some(prompt) = session.apply(effect) {
                outcome.provider_called = true;
                pending = Some(prompt);
            }
        }
        Ok(pending)
    }

    fn observe(&self, session: &Session, effect: &Effect, outcome: &mut DispatchOutcome) {
        match effect {
            Effect::RecordTurn { turn, emergency } => {
                if *emergency {
                    tracing::warn!(
                        session_id = %session.id,
                        "Crisis keywords detected, returning safety message"
                    );
                }
                outcome.recorded = Some(RecordedTurn {
                    turn: turn.clone(),
                    emergency: *emergency,
                });
            }
            Effect::UpdateMood { mood, source } if *mood != session.mood => {
                let source = match source {
                    MoodSource::Sentiment => "sentiment",
                    MoodSource::User => "user",
                    MoodSource::Reset => "reset",
                };
                tracing::info!(
                    session_id = %session.id,
                    from = %session.mood,
                    to = %mood,
                    source,
                    "Mood changed"
                );
            }
            Effect::ClearTranscript => {
                tracing::info!(
                    session_id = %session.id,
                    turns = session.transcript.len(),
                    "Transcript cleared"
                );
            }
            _ => {}
        }
    }

    /// Ask the provider for a reply and turn the result into an event
    pub async fn request_completion(&self, session_id: &str, prompt: &str) -> Event {
        tracing::debug!(
            session_id = %session_id,
            model = self.client.model_id(),
            prompt_chars = prompt.chars().count(),
            "Requesting completion"
        );

        match timeout(self.completion_timeout, self.client.complete(prompt)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => Event::CompletionSucceeded { text },
            Ok(Ok(_)) => Event::CompletionFailed {
                message: "Empty response from model".to_string(),
            },
            Ok(Err(e)) => {
                tracing::warn!(
                    session_id = %session_id,
                    kind = e.kind.as_str(),
                    transient = e.kind.is_transient(),
                    error = %e,
                    "Completion failed"
                );
                Event::CompletionFailed { message: e.message }
            }
            Err(_) => {
                tracing::warn!(
                    session_id = %session_id,
                    timeout_secs = self.completion_timeout.as_secs(),
                    "Completion timed out"
                );
                Event::CompletionFailed {
                    message: format!(
                        "Request timed out after {}s",
                        self.completion_timeout.as_secs()
                    ),
                }
            }
        }
    }
}
