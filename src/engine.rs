//! Conversation engine: triage, sentiment and prompt assembly
//!
//! Everything here is pure. The session state machine calls into these
//! functions; the runtime owns the provider call.

pub mod export;
mod mood;
pub mod prompt;
mod rules;
pub mod sentiment;
pub mod suggestions;
pub mod triage;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // Public API re-exports
pub use export::{export_transcript, ExportArtifact};
pub use mood::{Mood, ParseMoodError, Sentiment};
pub use prompt::PromptComposer;
pub use rules::{KeywordRules, RulesError, DEFAULT_SAFETY_MESSAGE};
pub use sentiment::analyze_sentiment;
pub use triage::detect_emergency;

/// Bot text recorded when the provider call fails
pub fn apology_message(detail: &str) -> String {
    format!("Maaf, terjadi kesalahan: {detail}. Silakan coba lagi.")
}
