//! Property-based tests for the state machine
//!
//! Random event sequences are driven through `transition`, with provider
//! calls answered synchronously, and invariants are checked after each step.

use super::*;
use crate::engine::{Mood, DEFAULT_SAFETY_MESSAGE};
use chrono::Utc;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Drive one event to completion, answering any provider request with `reply`.
/// Returns whether the provider was asked, or `None` if the event was rejected.
fn drive(session: &mut Session, ctx: &ConvContext, event: Event, reply: &str) -> Option<bool> {
    let result = transition(session, ctx, event).ok()?;
    session.state = result.new_state;

    let mut asked = false;
    for effect in result.effects {
        if session.apply(effect).is_some() {
            asked = true;
            let followup = transition(
                session,
                ctx,
                Event::CompletionSucceeded {
                    text: reply.to_string(),
                },
            )
            .ok()?;
            session.state = followup.new_state;
            for effect in followup.effects {
                session.apply(effect);
            }
        }
    }
    Some(asked)
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_mood() -> impl Strategy<Value = Mood> {
    prop_oneof![
        Just(Mood::Happy),
        Just(Mood::Sad),
        Just(Mood::Angry),
        Just(Mood::Neutral),
    ]
}

fn arb_message() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{1,20}",
        Just("I feel so hopeless".to_string()),
        Just("aku putus asa".to_string()),
        Just("terima kasih, aku putus asa".to_string()),
        Just("terima kasih, hari ini baik".to_string()),
        Just("aku sedih dan marah".to_string()),
        Just("   ".to_string()),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        1 => Just(Event::Start),
        1 => (prop::option::of("[A-Za-z ]{0,8}"), prop::option::of(arb_mood()))
            .prop_map(|(name, mood)| Event::SubmitProfile { name, mood }),
        1 => arb_mood().prop_map(|mood| Event::SetMood { mood }),
        1 => prop::option::of("[A-Za-z ]{0,8}").prop_map(|name| Event::SetName { name }),
        4 => arb_message().prop_map(|text| Event::UserMessage {
            text,
            received_at: Utc::now(),
        }),
        1 => Just(Event::Reset),
    ]
}

proptest! {
    #[test]
    fn transcript_only_grows_except_on_reset(events in prop::collection::vec(arb_event(), 0..40)) {
        let ctx = ConvContext::default();
        let mut session = Session::new("prop");

        for event in events {
            let before = session.transcript.clone();
            let is_reset = event == Event::Reset;
            let accepted = drive(&mut session, &ctx, event, "ok").is_some();

            if accepted && is_reset {
                prop_assert!(session.transcript.is_empty());
                prop_assert_eq!(session.mood, Mood::Neutral);
                prop_assert_eq!(&session.state, &SessionState::NotStarted);
            } else {
                prop_assert!(session.transcript.len() >= before.len());
                prop_assert_eq!(&session.transcript[..before.len()], &before[..]);
            }
            // Every event is driven to completion
            prop_assert!(!session.state.is_busy());
        }
    }

    #[test]
    fn emergency_never_reaches_provider(
        history in prop::collection::vec("[a-z ]{1,10}", 0..5),
        mood in arb_mood(),
        prefix in "[a-z ]{0,10}",
        sentiment_words in prop::sample::subsequence(
            vec!["terima kasih", "senang", "baik", "sedih", "marah", "stress"],
            0..=6,
        ),
    ) {
        let ctx = ConvContext::default();
        let mut session = Session::new("prop");
        session.state = SessionState::Chatting;
        for text in history {
            drive(&mut session, &ctx, Event::user_message(text), "ok");
        }
        session.mood = mood;
        let len_before = session.transcript.len();

        // Sentiment keywords alongside the crisis phrase must not matter
        let message = format!("{} {prefix}bunuh diri", sentiment_words.join(", "));
        let asked = drive(&mut session, &ctx, Event::user_message(message.clone()), "ok");

        prop_assert_eq!(asked, Some(false));
        prop_assert_eq!(session.transcript.len(), len_before + 1);
        let last = session.transcript.last().cloned();
        prop_assert_eq!(last.as_ref().map(|t| t.user_text.as_str()), Some(message.as_str()));
        prop_assert_eq!(last.as_ref().map(|t| t.bot_text.as_str()), Some(DEFAULT_SAFETY_MESSAGE));
        // Triage does not touch the mood
        prop_assert_eq!(session.mood, mood);
    }

    #[test]
    fn busy_session_rejects_new_messages(text in "[a-d]{1,10}", next in arb_event()) {
        let ctx = ConvContext::default();
        let mut session = Session::new("prop");
        session.state = SessionState::Chatting;

        let result = transition(&session, &ctx, Event::user_message(text));
        prop_assert!(result.is_ok());
        if let Ok(result) = result {
            session.state = result.new_state;
        }
        prop_assert!(session.state.is_busy());
        prop_assert_eq!(transition(&session, &ctx, next).err(), Some(TransitionError::SessionBusy));
    }
}
