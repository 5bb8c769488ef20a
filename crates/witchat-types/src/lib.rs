//! Shared domain types for witchat.
//!
//! This crate contains the domain types used across the workspace:
//! conversation history, NLU classifications, transcript rows, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod config;
pub mod conversation;
pub mod error;
pub mod intent;
pub mod transcript;
