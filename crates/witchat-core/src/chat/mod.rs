//! Per-session conversation state and turn handling.

pub mod registry;
pub mod service;
pub mod session;
pub mod store;
pub mod transcript;
