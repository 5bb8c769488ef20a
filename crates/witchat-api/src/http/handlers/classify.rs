//! Raw classification endpoint.
//!
//! `POST /api/v1/classify` runs one utterance through the classifier without
//! touching any session or the cache. Unlike a chat turn, classifier
//! failures are reported to the caller.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use witchat_types::intent::Classification;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// POST /api/v1/classify - Classify a single utterance.
pub async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ApiResponse<Classification>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }

    let classification = state.chat_service.classify_uncached(&req.text).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(classification, request_id, elapsed)))
}
