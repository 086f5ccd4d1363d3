//! Property-based tests for the classifiers and the prompt composer

use super::mood::{Mood, Sentiment};
use super::prompt::PromptComposer;
use super::rules::KeywordRules;
use super::sentiment::score;
use super::triage::detect_emergency;
use crate::state_machine::Turn;
use chrono::Utc;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Filler that cannot contain any default keyword (digits and `x` only)
fn arb_filler() -> impl Strategy<Value = String> {
    "[x0-9 ]{0,20}"
}

fn arb_mood() -> impl Strategy<Value = Mood> {
    prop_oneof![
        Just(Mood::Happy),
        Just(Mood::Sad),
        Just(Mood::Angry),
        Just(Mood::Neutral),
    ]
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    ("[a-z]{1,12}", "[a-z]{1,12}").prop_map(|(u, b)| Turn::new(u, b, Utc::now()))
}

/// Randomly flips the case of each character
fn scramble_case(s: &str, mask: &[bool]) -> String {
    s.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_uppercase().collect::<String>()
            } else {
                c.to_string()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn emergency_keyword_always_detected(
        idx in 0usize..8,
        prefix in arb_filler(),
        suffix in arb_filler(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let rules = KeywordRules::default();
        let keyword = &rules.emergency[idx % rules.emergency.len()];
        let message = format!("{prefix}{}{suffix}", scramble_case(keyword, &mask));
        prop_assert!(detect_emergency(&message, &rules));
    }

    #[test]
    fn filler_never_triggers_triage(text in arb_filler()) {
        prop_assert!(!detect_emergency(&text, &KeywordRules::default()));
    }

    #[test]
    fn sentiment_follows_strict_majority(
        pos in prop::sample::subsequence(vec!["senang", "bahagia", "baik", "terima kasih"], 0..=4),
        neg in prop::sample::subsequence(vec!["sedih", "marah", "buruk", "stress"], 0..=4),
        sep in arb_filler(),
    ) {
        let rules = KeywordRules::default();
        let mut words: Vec<&str> = pos.clone();
        words.extend(neg.iter().copied());
        let text = words.join(&format!(" {sep} "));

        let s = score(&text, &rules);
        prop_assert_eq!(s.positive, pos.len());
        prop_assert_eq!(s.negative, neg.len());

        let expected = match pos.len().cmp(&neg.len()) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        };
        prop_assert_eq!(s.sentiment(), expected);
    }

    #[test]
    fn prompt_sections_in_order(
        transcript in prop::collection::vec(arb_turn(), 0..6),
        mood in arb_mood(),
        name in prop::option::of("[A-Z][a-z]{1,8}"),
        message in "[a-z ]{1,20}",
    ) {
        let prompt = PromptComposer::default().compose(&transcript, &message, mood, name.as_deref());

        let mood_at = prompt.find(mood.instruction());
        prop_assert!(mood_at.is_some());

        // Header is the instruction line, the name line and a blank line
        let header_end = match &name {
            Some(name) => {
                let line = format!(".\nNama pengguna: {name}\n\n");
                prompt.find(&line).map(|i| i + line.len())
            }
            None => {
                prop_assert!(!prompt.contains("Nama pengguna"));
                prompt.find(".\n\n\n").map(|i| i + 4)
            }
        };
        prop_assert!(header_end.is_some());
        let mut cursor = header_end.unwrap_or(0);
        prop_assert!(mood_at.unwrap_or(0) < cursor);

        for turn in &transcript {
            let pair = format!("User: {}\nAssistant: {}\n", turn.user_text, turn.bot_text);
            let at = prompt[cursor..].find(&pair);
            prop_assert!(at.is_some(), "turn out of order: {:?}", turn);
            cursor += at.unwrap_or(0) + pair.len();
        }

        let tail = format!("User: {message}\nAssistant:");
        prop_assert_eq!(&prompt[cursor..], tail.as_str());
    }
}
