//! Keyword rule tables for triage and sentiment
//!
//! The lists are data, not code: a TOML file can replace any of them
//! without a rebuild. Missing keys fall back to the built-in defaults.
//!
//! ```toml
//! emergency = ["bunuh diri", "putus asa"]
//! positive = ["senang", "baik"]
//! negative = ["sedih", "buruk"]
//! safety_message = "..."
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_EMERGENCY: &[&str] = &[
    "bunuh diri",
    "mati aja",
    "depresi berat",
    "putus asa",
    "suicide",
    "end it all",
    "severe depression",
    "hopeless",
];

const DEFAULT_POSITIVE: &[&str] = &["senang", "bahagia", "baik", "terima kasih"];

const DEFAULT_NEGATIVE: &[&str] = &["sedih", "marah", "buruk", "stress"];

pub const DEFAULT_SAFETY_MESSAGE: &str = "Aku sangat khawatir dengan keadaanmu. Kamu tidak sendirian. ❤️\n\n\
Silakan hubungi:\n\
☎️ 119 (Layanan Darurat Kesehatan Mental)\n\
☎️ 112 (Darurat Nasional)\n\
Atau segera hubungi orang terdekat yang kamu percaya.";

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read rules file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid rules file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Emergency keyword list must not be empty")]
    NoEmergencyKeywords,
    #[error("Safety message must not be empty")]
    EmptySafetyMessage,
}

/// Keyword tables, stored lowercased and trimmed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordRules {
    pub emergency: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub safety_message: String,
}

impl Default for KeywordRules {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| (*w).to_string()).collect()
        }
        Self {
            emergency: owned(DEFAULT_EMERGENCY),
            positive: owned(DEFAULT_POSITIVE),
            negative: owned(DEFAULT_NEGATIVE),
            safety_message: DEFAULT_SAFETY_MESSAGE.to_string(),
        }
    }
}

impl KeywordRules {
    pub fn from_toml_str(content: &str) -> Result<Self, RulesError> {
        let rules: KeywordRules = toml::from_str(content)?;
        rules.normalized()
    }

    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Lowercase and trim every keyword, dropping blanks, and validate.
    fn normalized(self) -> Result<Self, RulesError> {
        fn clean(words: Vec<String>) -> Vec<String> {
            let mut out: Vec<String> = Vec::with_capacity(words.len());
            for word in words {
                let word = word.trim().to_lowercase();
                if !word.is_empty() && !out.contains(&word) {
                    out.push(word);
                }
            }
            out
        }

        let rules = Self {
            emergency: clean(self.emergency),
            positive: clean(self.positive),
            negative: clean(self.negative),
            safety_message: self.safety_message,
        };

        if rules.emergency.is_empty() {
            return Err(RulesError::NoEmergencyKeywords);
        }
        if rules.safety_message.trim().is_empty() {
            return Err(RulesError::EmptySafetyMessage);
        }
        Ok(rules)
    }
}
