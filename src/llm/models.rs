//! Centralized model definitions
//!
//! Every Gemini model the service can talk to is listed here, so adding a
//! model is a one-entry change.

/// Gemini models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiModel {
    Gemini15Flash,
    Gemini15Pro,
    Gemini20Flash,
}

impl GeminiModel {
    /// Name used in the provider's URL path
    pub fn api_name(self) -> &'static str {
        self.def().api_name
    }

    /// User-facing model ID
    pub fn model_id(self) -> &'static str {
        self.def().id
    }

    pub fn context_window(self) -> usize {
        self.def().context_window
    }

    fn def(self) -> &'static ModelDef {
        all_models()
            .iter()
            .find(|def| def.model == self)
            .unwrap_or(&all_models()[0])
    }
}

/// Model definition with metadata
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// User-facing model ID (e.g., "gemini-1.5-flash")
    pub id: &'static str,
    pub model: GeminiModel,
    /// API name used by the provider
    pub api_name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Context window size in tokens
    pub context_window: usize,
}

pub const DEFAULT_MODEL_ID: &str = "gemini-1.5-flash";

/// Get all available model definitions. The first entry is the default.
pub fn all_models() -> &'static [ModelDef] {
    &[
        ModelDef {
            id: "gemini-1.5-flash",
            model: GeminiModel::Gemini15Flash,
            api_name: "gemini-1.5-flash",
            description: "Gemini 1.5 Flash (fast, default)",
            context_window: 1_048_576,
        },
        ModelDef {
            id: "gemini-1.5-pro",
            model: GeminiModel::Gemini15Pro,
            api_name: "gemini-1.5-pro",
            description: "Gemini 1.5 Pro (most capable, slower)",
            context_window: 2_097_152,
        },
        ModelDef {
            id: "gemini-2.0-flash",
            model: GeminiModel::Gemini20Flash,
            api_name: "gemini-2.0-flash",
            description: "Gemini 2.0 Flash",
            context_window: 1_048_576,
        },
    ]
}

/// Look up a model definition by its user-facing ID
pub fn find_model(id: &str) -> Option<&'static ModelDef> {
    all_models().iter().find(|def| def.id == id)
}
