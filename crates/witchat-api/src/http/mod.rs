//! HTTP layer for witchat.
//!
//! Server-rendered chat pages at `/` and `/chat/{id}`, plus a JSON REST API
//! at `/api/v1/` using the envelope response format.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
