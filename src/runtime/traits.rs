//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::llm::{LlmError, LlmRequest, LlmService};
use async_trait::async_trait;
use std::sync::Arc;

/// Client for the external completion provider
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete a pre-composed prompt, returning the generated text
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

// ============================================================================
// Production implementation
// ============================================================================

/// Completion client backed by an `LlmService`
pub struct ProviderClient {
    service: Arc<dyn LlmService>,
}

impl ProviderClient {
    pub fn new(service: Arc<dyn LlmService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CompletionClient for ProviderClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = LlmRequest::from_prompt(prompt);
        let response = self.service.complete(&request).await?;
        Ok(response.trimmed_text().to_string())
    }

    fn model_id(&self) -> &str {
        self.service.model_id()
    }
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).complete(prompt).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
