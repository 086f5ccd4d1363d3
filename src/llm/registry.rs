//! Provider construction from configuration

use super::models::{find_model, DEFAULT_MODEL_ID};
use super::{GeminiService, LlmError, LlmService, LoggingService};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Configuration for the completion provider
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub google_api_key: Option<String>,
    /// Gateway base URL; when set the gateway handles authentication
    pub gateway: Option<String>,
    /// Model ID, defaults to `gemini-1.5-flash`
    pub model: Option<String>,
}

impl LlmConfig {
    pub fn model_id(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL_ID)
    }
}

/// Reasons the provider could not be initialized
#[derive(Debug, Error)]
pub enum ProviderInitError {
    #[error("GOOGLE_API_KEY is not set (and no LLM_GATEWAY configured)")]
    MissingApiKey,
    #[error("Unknown model '{0}'")]
    UnknownModel(String),
    #[error("Failed to initialize provider: {0}")]
    Client(#[from] LlmError),
}

/// Create the completion provider, wrapped with logging.
///
/// In gateway mode "implicit" is used as the API key and no key is sent.
pub fn create_service(
    config: &LlmConfig,
    request_timeout: Duration,
) -> Result<Arc<dyn LlmService>, ProviderInitError> {
    let model_id = config.model_id();
    let def = find_model(model_id)
        .ok_or_else(|| ProviderInitError::UnknownModel(model_id.to_string()))?;

    let api_key = if config.gateway.is_some() {
        "implicit".to_string()
    } else {
        match config.google_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(ProviderInitError::MissingApiKey),
        }
    };

    let service = GeminiService::new(
        api_key,
        def.model,
        config.gateway.as_deref(),
        request_timeout,
    )?;
    Ok(Arc::new(LoggingService::new(Arc::new(service))))
}
