//! Chat session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                 - Create a session
//! - GET    /api/v1/sessions                 - List sessions
//! - GET    /api/v1/sessions/{id}            - Get a session with its history
//! - DELETE /api/v1/sessions/{id}            - End a session
//! - POST   /api/v1/sessions/{id}/messages   - Run one chat turn
//! - POST   /api/v1/sessions/{id}/clear      - Reset the conversation, keep the session
//! - GET    /api/v1/sessions/{id}/transcript - Rendered rows and interleaved export

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use witchat_core::chat::service::TurnReport;
use witchat_core::chat::session::SessionSummary;
use witchat_types::conversation::ConversationHistory;
use witchat_types::transcript::{InterleavedEntry, TranscriptRow};

use super::parse_session_id;
use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub summary: SessionSummary,
    pub last_input: Option<String>,
    pub history: ConversationHistory,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    /// Display rows, newest first.
    pub rows: Vec<TranscriptRow>,
    /// `[is_user, text]` pairs in the same order.
    pub interleaved: Vec<InterleavedEntry>,
}

fn session_href(id: &Uuid) -> String {
    format!("/api/v1/sessions/{id}")
}

/// POST /api/v1/sessions - Create an empty session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<SessionSummary>>), AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = state.sessions.create().await;
    let summary = state.sessions.get(&id).await?.lock().await.summary();

    let elapsed = start.elapsed().as_millis() as u64;
    let href = session_href(&id);
    let resp = ApiResponse::success(summary, request_id, elapsed)
        .with_link("self", &href)
        .with_link("messages", &format!("{href}/messages"))
        .with_link("transcript", &format!("{href}/transcript"));

    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /api/v1/sessions - List all live sessions, oldest first.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SessionSummary>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let summaries = state.sessions.summaries().await;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(summaries, request_id, elapsed)
        .with_link("self", "/api/v1/sessions");

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id} - Get a session with its conversation history.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionDetail>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_session_id(&session_id)?;
    let handle = state.sessions.get(&id).await?;
    let detail = {
        let session = handle.lock().await;
        SessionDetail {
            summary: session.summary(),
            last_input: session.last_input().map(str::to_string),
            history: session.snapshot(),
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let href = session_href(&id);
    let resp = ApiResponse::success(detail, request_id, elapsed)
        .with_link("self", &href)
        .with_link("transcript", &format!("{href}/transcript"));

    Ok(Json(resp))
}

/// DELETE /api/v1/sessions/{id} - End a session and discard its state.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_session_id(&session_id)?;
    state.sessions.remove(&id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        serde_json::json!({ "deleted": true, "id": id }),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}

/// POST /api/v1/sessions/{id}/messages - Run one turn.
///
/// Classification failures do not fail the request: the turn is recorded
/// with the fallback response and the outcome says `failed`.
pub async fn post_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<ApiResponse<TurnReport>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_session_id(&session_id)?;
    let handle = state.sessions.get(&id).await?;
    let report = {
        let mut session = handle.lock().await;
        state
            .chat_service
            .handle_turn(&mut session, &req.message)
            .await?
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let href = session_href(&id);
    let resp = ApiResponse::success(report, request_id, elapsed)
        .with_link("session", &href)
        .with_link("transcript", &format!("{href}/transcript"));

    Ok(Json(resp))
}

/// POST /api/v1/sessions/{id}/clear - Reset the conversation.
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionSummary>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_session_id(&session_id)?;
    let handle = state.sessions.get(&id).await?;
    let summary = {
        let mut session = handle.lock().await;
        session.reset();
        session.summary()
    };
    tracing::info!(session_id = %id, "conversation cleared");

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(summary, request_id, elapsed)
        .with_link("session", &session_href(&id));

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id}/transcript - Render the transcript, newest first.
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<TranscriptResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_session_id(&session_id)?;
    let handle = state.sessions.get(&id).await?;
    let transcript = {
        let mut session = handle.lock().await;
        let rows = session.render_transcript();
        TranscriptResponse {
            rows,
            interleaved: session.interleaved().to_vec(),
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(transcript, request_id, elapsed)
        .with_link("session", &session_href(&id));

    Ok(Json(resp))
}
