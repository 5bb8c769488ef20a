//! wit.ai intent classifier.
//!
//! This module provides the [`WitClassifier`] which implements the
//! [`IntentClassifier`](witchat_core::nlu::classifier::IntentClassifier)
//! trait for the wit.ai `/message` endpoint.

pub mod client;
pub mod types;

pub use client::WitClassifier;
