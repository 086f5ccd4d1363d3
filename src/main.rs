//! Mindful Chat - supportive chat companion backend
//!
//! Serves the conversation engine over HTTP: crisis triage, mood tracking
//! and prompt assembly in front of a hosted Gemini model.

mod api;
mod config;
mod engine;
mod llm;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use config::Config;
use engine::{KeywordRules, PromptComposer};
use runtime::{ProviderClient, SessionManager};
use state_machine::ConvContext;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindful_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    // Keyword rules
    let rules = match &config.rules_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading keyword rules");
            KeywordRules::load(path).inspect_err(|e| {
                tracing::error!(error = %e, "Failed to load keyword rules");
            })?
        }
        None => KeywordRules::default(),
    };
    tracing::info!(
        emergency = rules.emergency.len(),
        positive = rules.positive.len(),
        negative = rules.negative.len(),
        "Keyword rules ready"
    );

    // Completion provider
    let service = llm::create_service(&config.llm, config.completion_timeout).inspect_err(|e| {
        tracing::error!(error = %e, "Completion provider unavailable");
    })?;
    tracing::info!(
        model = service.model_id(),
        context_window = service.context_window(),
        gateway = config.llm.gateway.is_some(),
        "Completion provider initialized"
    );

    // Create application state
    let context = ConvContext::new(
        Arc::new(rules),
        PromptComposer::new(config.max_history_turns),
    );
    let sessions = SessionManager::new(
        context,
        Arc::new(ProviderClient::new(service)),
        config.completion_timeout,
    );
    let state = AppState::new(sessions);
    match config.session_idle_timeout {
        Some(idle) => {
            tracing::info!(idle_secs = idle.as_secs(), "Idle session eviction enabled");
            state.sessions.spawn_idle_sweeper(idle);
        }
        None => tracing::info!("Idle session eviction disabled"),
    }

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Mindful Chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
