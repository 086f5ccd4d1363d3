//! Crisis keyword detection
//!
//! Runs before anything else on an incoming message. A match short-circuits
//! the turn: the fixed safety message is returned and the provider is not
//! contacted.

use super::rules::KeywordRules;

/// First emergency keyword found in `message`, matched case-insensitively
/// as a substring.
pub fn matched_emergency_keyword<'r>(message: &str, rules: &'r KeywordRules) -> Option<&'r str> {
    let lowered = message.to_lowercase();
    rules
        .emergency
        .iter()
        .map(String::as_str)
        .find(|keyword| lowered.contains(keyword))
}

pub fn detect_emergency(message: &str, rules: &KeywordRules) -> bool {
    matched_emergency_keyword(message, rules).is_some()
}
