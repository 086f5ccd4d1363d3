//! Prompt assembly
//!
//! The provider gets a plain-text continuation prompt: persona and tone,
//! a user name line (blank when unnamed), the transcript as `User:`/`Assistant:` lines, and the
//! new message followed by an open `Assistant:` cue.

use super::mood::Mood;
use crate::state_machine::Turn;
use std::fmt::Write;

const PERSONA: &str = "Kamu adalah chatbot kesehatan mental yang berperan sebagai teman dekat.";

const STYLE_RULES: &str = "Gunakan bahasa santai, gaul, dan tidak kaku. \
Jangan tampilkan poin-poin atau penjelasan seperti (1. Validasi perasaan). \
Respon harus natural dan mengalir.";

pub const USER_LABEL: &str = "User";
pub const ASSISTANT_LABEL: &str = "Assistant";
const NAME_LABEL: &str = "Nama pengguna";

/// Builds the provider prompt for one turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptComposer {
    /// Keep only the most recent turns. `None` resends the whole transcript.
    pub max_history_turns: Option<usize>,
}

impl PromptComposer {
    pub fn new(max_history_turns: Option<usize>) -> Self {
        Self { max_history_turns }
    }

    /// Turns that will be serialized, oldest first
    pub fn history_window<'t>(&self, transcript: &'t [Turn]) -> &'t [Turn] {
        match self.max_history_turns {
            Some(max) if transcript.len() > max => {
                transcript.get(transcript.len() - max..).unwrap_or(transcript)
            }
            _ => transcript,
        }
    }

    pub fn compose(
        &self,
        transcript: &[Turn],
        new_message: &str,
        mood: Mood,
        user_name: Option<&str>,
    ) -> String {
        let mut prompt = format!("{PERSONA} {}. {STYLE_RULES}\n", mood.instruction());

        // The name line is always present; it stays empty without a name
        if let Some(name) = user_name.map(str::trim).filter(|n| !n.is_empty()) {
            let _ = write!(prompt, "{NAME_LABEL}: {name}");
        }
        prompt.push_str("\n\n");

        for turn in self.history_window(transcript) {
            let _ = writeln!(prompt, "{USER_LABEL}: {}", turn.user_text);
            let _ = writeln!(prompt, "{ASSISTANT_LABEL}: {}", turn.bot_text);
        }

        let _ = write!(prompt, "{USER_LABEL}: {new_message}\n{ASSISTANT_LABEL}:");
        prompt
    }
}
