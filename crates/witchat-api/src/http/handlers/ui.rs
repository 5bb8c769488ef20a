//! Server-rendered chat page.
//!
//! Endpoints:
//! - GET  /                     - Start a session and redirect to its page
//! - GET  /chat/{id}            - Input box, clear button and transcript
//! - POST /chat/{id}            - Submit `user_input`, then redirect back
//! - POST /chat/{id}/clear      - Reset the conversation, then redirect back
//! - GET  /chat/{id}/download   - Interleaved transcript as a JSON attachment
//!
//! Every page load re-renders the whole transcript, newest turn on top.

use std::sync::OnceLock;

use axum::Form;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect};
use minijinja::{Environment, context};
use serde::Deserialize;
use uuid::Uuid;

use witchat_infra::filesystem::transcript_json;
use witchat_types::error::SessionError;
use witchat_types::transcript::TranscriptRow;

use super::parse_session_id;
use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub user_input: String,
}

fn chat_href(id: &Uuid) -> String {
    format!("/chat/{id}")
}

/// GET / - Create a session and send the browser to it.
pub async fn index(State(state): State<AppState>) -> Redirect {
    let id = state.sessions.create().await;
    Redirect::to(&chat_href(&id))
}

/// GET /chat/{id} - Render the chat page.
pub async fn chat_page(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_session_id(&session_id)?;
    let handle = state.sessions.get(&id).await?;
    let rows = handle.lock().await.render_transcript();

    let page = render_page(&id, &rows).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Html(page))
}

/// POST /chat/{id} - Run one turn from the form input.
///
/// Blank input is ignored and the page is simply shown again.
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Form(form): Form<ChatForm>,
) -> Result<Redirect, AppError> {
    let id = parse_session_id(&session_id)?;
    let handle = state.sessions.get(&id).await?;

    let mut session = handle.lock().await;
    match state
        .chat_service
        .handle_turn(&mut session, &form.user_input)
        .await
    {
        Ok(_) | Err(SessionError::EmptyUtterance) => Ok(Redirect::to(&chat_href(&id))),
        Err(e) => Err(e.into()),
    }
}

/// POST /chat/{id}/clear - Reset the conversation.
pub async fn clear(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_session_id(&session_id)?;
    state.sessions.get(&id).await?.lock().await.reset();
    tracing::info!(session_id = %id, "conversation cleared");

    Ok(Redirect::to(&chat_href(&id)))
}

/// GET /chat/{id}/download - Interleaved transcript as a JSON file.
pub async fn download(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_session_id(&session_id)?;
    let handle = state.sessions.get(&id).await?;
    let entries = {
        let mut session = handle.lock().await;
        session.render_transcript();
        session.interleaved().to_vec()
    };

    let body = transcript_json(&entries).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"transcript-{id}.json\""),
            ),
        ],
        body,
    ))
}

const CHAT_TEMPLATE: &str = "chat.html";

static TEMPLATES: OnceLock<Environment<'static>> = OnceLock::new();

/// Shared template environment, built on first use.
///
/// Templates with an `.html` name are auto-escaped.
fn templates() -> Result<&'static Environment<'static>, minijinja::Error> {
    if let Some(env) = TEMPLATES.get() {
        return Ok(env);
    }
    let mut env = Environment::new();
    env.add_template(CHAT_TEMPLATE, include_str!("../../../templates/chat.html"))?;
    Ok(TEMPLATES.get_or_init(|| env))
}

/// Render the full chat page for a session.
pub fn render_page(id: &Uuid, rows: &[TranscriptRow]) -> Result<String, minijinja::Error> {
    templates()?.get_template(CHAT_TEMPLATE)?.render(context! {
        href => chat_href(id),
        rows => rows,
    })
}
