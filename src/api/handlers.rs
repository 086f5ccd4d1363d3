//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, CloseResponse, ErrorResponse, ModelInfo, MoodRequest, NameRequest,
    ProfileRequest, SessionView,
};
use super::AppState;
use crate::engine::suggestions::{suggestions, Suggestions};
use crate::engine::{export_transcript, ExportArtifact, Mood};
use crate::llm::find_model;
use crate::runtime::SessionError;
use crate::state_machine::{Event, TransitionError};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id/start", post(start_session))
        .route("/api/sessions/:id/profile", post(submit_profile))
        .route("/api/sessions/:id/reset", post(reset_session))
        .route("/api/sessions/:id/close", post(close_session))
        // Sidebar controls
        .route("/api/sessions/:id/mood", post(set_mood))
        .route("/api/sessions/:id/name", post(set_name))
        // Chat
        .route("/api/sessions/:id/chat", post(send_chat))
        .route("/api/sessions/:id/export", get(export_session))
        // Static data
        .route("/api/suggestions", get(get_suggestions))
        .route("/api/model", get(get_model))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Session Lifecycle
// ============================================================

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionView::from(&session)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.snapshot(&id).await?;
    Ok(Json(SessionView::from(&session)))
}

async fn start_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    dispatch_view(&state, &id, Event::Start).await
}

async fn submit_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<ProfileRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mood = req.mood.as_deref().map(parse_mood).transpose()?;
    dispatch_view(
        &state,
        &id,
        Event::SubmitProfile {
            name: req.name,
            mood,
        },
    )
    .await
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    dispatch_view(&state, &id, Event::Reset).await
}

async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CloseResponse>, AppError> {
    if state.sessions.close(&id).await {
        Ok(Json(CloseResponse { closed: true }))
    } else {
        Err(AppError::NotFound(format!("Session not found: {id}")))
    }
}

// ============================================================
// Sidebar Controls
// ============================================================

async fn set_mood(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<MoodRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mood = parse_mood(&req.mood)?;
    dispatch_view(&state, &id, Event::SetMood { mood }).await
}

async fn set_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<NameRequest>,
) -> Result<Json<SessionView>, AppError> {
    dispatch_view(&state, &id, Event::SetName { name: req.name }).await
}

// ============================================================
// Chat
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let (outcome, session) = state
        .sessions
        .dispatch(&id, Event::user_message(req.text))
        .await?;

    let recorded = outcome
        .recorded
        .ok_or_else(|| AppError::Internal("Turn finished without a reply".to_string()))?;

    Ok(Json(ChatResponse {
        reply: recorded.turn.bot_text,
        emergency: recorded.emergency,
        mood: session.mood,
        session: SessionView::from(&session),
    }))
}

async fn export_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExportArtifact>, AppError> {
    let session = state.sessions.snapshot(&id).await?;
    Ok(Json(export_transcript(&session.transcript)))
}

// ============================================================
// Static Data
// ============================================================

async fn get_suggestions() -> Json<Suggestions> {
    Json(suggestions())
}

async fn get_model(State(state): State<AppState>) -> Json<ModelInfo> {
    let id = state.sessions.model_id().to_string();
    let def = find_model(&id);
    Json(ModelInfo {
        description: def.map(|d| d.description),
        context_window: def.map(|d| d.context_window),
        id,
    })
}

async fn get_version() -> &'static str {
    concat!("mindful-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Helpers
// ============================================================

async fn dispatch_view(
    state: &AppState,
    id: &str,
    event: Event,
) -> Result<Json<SessionView>, AppError> {
    let (_, session) = state.sessions.dispatch(id, event).await?;
    Ok(Json(SessionView::from(&session)))
}

fn parse_mood(value: &str) -> Result<Mood, AppError> {
    value
        .parse::<Mood>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

// ============================================================
// Error Handling
// ============================================================

/// JSON body extractor whose rejections use the API error shape
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
struct AppJson<T>(T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => AppError::NotFound(err.to_string()),
            SessionError::Transition(TransitionError::EmptyMessage) => {
                AppError::BadRequest(err.to_string())
            }
            SessionError::Transition(_) => AppError::Conflict(err.to_string()),
            SessionError::Task(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
