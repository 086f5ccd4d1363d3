//! Mood labels and the sentiment they are derived from

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse emotional state attached to a session, used to steer reply tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    #[default]
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Angry, Mood::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Neutral => "neutral",
        }
    }

    /// Localized display label
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Senang",
            Mood::Sad => "Sedih",
            Mood::Angry => "Marah",
            Mood::Neutral => "Netral",
        }
    }

    /// Label with emoji, as shown on the mood picker
    pub fn picker_label(self) -> &'static str {
        match self {
            Mood::Happy => "😊 Senang",
            Mood::Sad => "😢 Sedih",
            Mood::Angry => "😠 Marah",
            Mood::Neutral => "😐 Netral",
        }
    }

    /// Tone instruction inlined into the prompt preamble
    pub fn instruction(self) -> &'static str {
        match self {
            Mood::Happy => "respon dengan semangat dan antusias",
            Mood::Sad => "berikan dukungan emosional dan empati",
            Mood::Angry => "bersikap menenangkan dan netral",
            Mood::Neutral => "bersikap ramah dan suportif",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood '{0}' (expected happy, sad, angry or neutral)")]
pub struct ParseMoodError(pub String);

impl FromStr for Mood {
    type Err = ParseMoodError;

    /// Accepts the English ids and the Indonesian labels, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" | "senang" => Ok(Mood::Happy),
            "sad" | "sedih" => Ok(Mood::Sad),
            "angry" | "marah" => Ok(Mood::Angry),
            "neutral" | "netral" => Ok(Mood::Neutral),
            _ => Err(ParseMoodError(s.to_string())),
        }
    }
}

/// Output of the sentiment classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl From<Sentiment> for Mood {
    /// `Angry` has no sentiment counterpart; only the user can pick it.
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => Mood::Happy,
            Sentiment::Negative => Mood::Sad,
            Sentiment::Neutral => Mood::Neutral,
        }
    }
}
