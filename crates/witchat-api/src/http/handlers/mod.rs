//! HTTP request handlers.

pub mod classify;
pub mod session;
pub mod ui;

use uuid::Uuid;

use crate::http::error::AppError;

/// Parse a session ID from a path parameter, returning a 400 error on invalid format.
pub fn parse_session_id(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid session ID: {s}")))
}
