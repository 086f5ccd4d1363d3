//! Canned prompts offered by the UI

use super::mood::Mood;
use serde::Serialize;

pub const QUICK_REPLIES: &[&str] = &[
    "Aku merasa sedih hari ini",
    "Bagaimana cara mengurangi stres?",
    "Ceritakan sesuatu yang menyenangkan",
    "Aku butuh motivasi",
];

pub const TIP_TOPICS: &[&str] = &["Stres", "Kecemasan", "Tidur", "Hubungan"];

const ABOUT_TITLE: &str = "Tentang Aplikasi";

const ABOUT_TEXT: &str = "Chatbot kesehatan mental ini adalah teman berbicara virtual. \
Bukan pengganti profesional. Jika dalam krisis, segera cari bantuan.";

/// Message sent when a tip topic is picked
pub fn tip_request(topic: &str) -> String {
    format!("Berikan tips mengatasi {}", topic.to_lowercase())
}

#[derive(Debug, Clone, Serialize)]
pub struct TipSuggestion {
    pub topic: &'static str,
    pub label: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodOption {
    pub mood: Mood,
    pub label: &'static str,
}

/// Disclaimer shown under the sidebar controls
#[derive(Debug, Clone, Serialize)]
pub struct About {
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestions {
    pub quick_replies: Vec<&'static str>,
    pub tips: Vec<TipSuggestion>,
    pub moods: Vec<MoodOption>,
    pub about: About,
}

pub fn suggestions() -> Suggestions {
    Suggestions {
        quick_replies: QUICK_REPLIES.to_vec(),
        tips: TIP_TOPICS
            .iter()
            .map(|&topic| TipSuggestion {
                topic,
                label: format!("💡 Tips {topic}"),
                message: tip_request(topic),
            })
            .collect(),
        moods: Mood::ALL
            .iter()
            .map(|&mood| MoodOption {
                mood,
                label: mood.picker_label(),
            })
            .collect(),
        about: About {
            title: ABOUT_TITLE,
            text: ABOUT_TEXT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_request_lowercases_topic() {
        assert_eq!(tip_request("Kecemasan"), "Berikan tips mengatasi kecemasan");
    }

    #[test]
    fn test_suggestions_cover_every_mood() {
        let s = suggestions();
        assert_eq!(s.quick_replies.len(), 4);
        assert_eq!(s.tips[0].label, "💡 Tips Stres");
        assert_eq!(s.tips[0].message, "Berikan tips mengatasi stres");
        assert_eq!(s.moods.len(), Mood::ALL.len());
    }

    #[test]
    fn test_about_carries_disclaimer() {
        let about = suggestions().about;
        assert_eq!(about.title, "Tentang Aplikasi");
        assert!(about.text.contains("Bukan pengganti profesional"));
        assert!(about.text.contains("segera cari bantuan"));
    }
}
