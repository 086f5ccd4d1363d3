//! Process configuration from the environment

use crate::llm::LlmConfig;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub port: u16,
    /// Optional TOML file replacing the built-in keyword lists
    pub rules_path: Option<PathBuf>,
    pub completion_timeout: Duration,
    /// Bound on turns resent to the provider; `None` sends everything
    pub max_history_turns: Option<usize>,
    /// Sessions untouched this long are dropped; `None` keeps them forever
    pub session_idle_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let port = parse_var(get("MINDFUL_PORT"), "MINDFUL_PORT", "a port number")?
            .unwrap_or(DEFAULT_PORT);

        let completion_timeout = match parse_var::<u64>(
            get("MINDFUL_COMPLETION_TIMEOUT_SECS"),
            "MINDFUL_COMPLETION_TIMEOUT_SECS",
            "a positive number of seconds",
        )? {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    var: "MINDFUL_COMPLETION_TIMEOUT_SECS",
                    expected: "a positive number of seconds",
                    value: "0".to_string(),
                })
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_COMPLETION_TIMEOUT,
        };

        let max_history_turns = parse_var(
            get("MINDFUL_MAX_HISTORY_TURNS"),
            "MINDFUL_MAX_HISTORY_TURNS",
            "a number of turns",
        )?;

        let session_idle_timeout = match parse_var::<u64>(
            get("MINDFUL_SESSION_IDLE_SECS"),
            "MINDFUL_SESSION_IDLE_SECS",
            "a number of seconds",
        )? {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(DEFAULT_SESSION_IDLE_TIMEOUT),
        };

        Ok(Self {
            llm: LlmConfig {
                google_api_key: get("GOOGLE_API_KEY"),
                gateway: get("LLM_GATEWAY"),
                model: get("GEMINI_MODEL"),
            },
            port,
            rules_path: get("MINDFUL_RULES_PATH").map(PathBuf::from),
            completion_timeout,
            max_history_turns,
            session_idle_timeout,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    value: Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
                var,
                expected,
                value: v.clone(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.completion_timeout, Duration::from_secs(60));
        assert_eq!(config.max_history_turns, None);
        assert_eq!(
            config.session_idle_timeout,
            Some(Duration::from_secs(1800))
        );
        assert!(config.rules_path.is_none());
        assert!(config.llm.google_api_key.is_none());
        assert_eq!(config.llm.model_id(), "gemini-1.5-flash");
    }

    #[test]
    fn test_all_values() {
        let config = config_from(&[
            ("GOOGLE_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("MINDFUL_PORT", "9090"),
            ("MINDFUL_RULES_PATH", "/etc/mindful/rules.toml"),
            ("MINDFUL_COMPLETION_TIMEOUT_SECS", " 15 "),
            ("MINDFUL_MAX_HISTORY_TURNS", "20"),
            ("MINDFUL_SESSION_IDLE_SECS", "600"),
        ])
        .unwrap();
        assert_eq!(config.llm.google_api_key.as_deref(), Some("secret"));
        assert_eq!(config.llm.model_id(), "gemini-1.5-pro");
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.rules_path,
            Some(PathBuf::from("/etc/mindful/rules.toml"))
        );
        assert_eq!(config.completion_timeout, Duration::from_secs(15));
        assert_eq!(config.max_history_turns, Some(20));
        assert_eq!(config.session_idle_timeout, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_zero_idle_timeout_disables_eviction() {
        let config = config_from(&[("MINDFUL_SESSION_IDLE_SECS", "0")]).unwrap();
        assert_eq!(config.session_idle_timeout, None);
        assert!(config_from(&[("MINDFUL_SESSION_IDLE_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_blank_counts_as_unset() {
        let config = config_from(&[("GOOGLE_API_KEY", "  "), ("MINDFUL_PORT", "")]).unwrap();
        assert!(config.llm.google_api_key.is_none());
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_invalid_numbers() {
        let err = config_from(&[("MINDFUL_PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "MINDFUL_PORT must be a port number, got 'eighty'"
        );
        assert!(config_from(&[("MINDFUL_COMPLETION_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("MINDFUL_MAX_HISTORY_TURNS", "-3")]).is_err());
    }
}
