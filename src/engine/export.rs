//! Plain-text transcript export, delivered as an inline data URI

use crate::state_machine::Turn;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use std::fmt::Write;

const EXPORT_HEADER: &str = "Riwayat Percakapan:\n\n";
pub const EXPORT_FILENAME: &str = "chat_history.txt";
pub const EXPORT_LINK_TEXT: &str = "Download Riwayat Chat";

/// Downloadable transcript
#[derive(Debug, Clone, Serialize)]
pub struct ExportArtifact {
    pub filename: &'static str,
    pub link_text: &'static str,
    pub text: String,
    pub data_uri: String,
}

/// One `User:`/`Bot:` pair per turn, in transcript order
pub fn render_transcript(transcript: &[Turn]) -> String {
    let mut text = String::from(EXPORT_HEADER);
    for turn in transcript {
        let _ = write!(text, "User: {}\nBot: {}\n\n", turn.user_text, turn.bot_text);
    }
    text
}

pub fn export_transcript(transcript: &[Turn]) -> ExportArtifact {
    let text = render_transcript(transcript);
    let data_uri = format!("data:file/txt;base64,{}", STANDARD.encode(text.as_bytes()));
    ExportArtifact {
        filename: EXPORT_FILENAME,
        link_text: EXPORT_LINK_TEXT,
        text,
        data_uri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_empty_transcript_is_header_only() {
        assert_eq!(render_transcript(&[]), "Riwayat Percakapan:\n\n");
    }

    #[test]
    fn test_pairs_in_order() {
        let transcript = vec![
            Turn::new("halo", "hai juga", Utc::now()),
            Turn::new("aku capek", "istirahat dulu ya", Utc::now()),
        ];
        assert_eq!(
            render_transcript(&transcript),
            "Riwayat Percakapan:\n\nUser: halo\nBot: hai juga\n\nUser: aku capek\nBot: istirahat dulu ya\n\n"
        );
    }

    #[test]
    fn test_data_uri_decodes_to_text() {
        let transcript = vec![Turn::new("terima kasih", "sama-sama ❤️", Utc::now())];
        let artifact = export_transcript(&transcript);

        let encoded = artifact
            .data_uri
            .strip_prefix("data:file/txt;base64,")
            .unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, artifact.text);
        assert_eq!(artifact.filename, "chat_history.txt");
    }
}
