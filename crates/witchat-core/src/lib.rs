//! Conversation logic and classifier trait definitions for witchat.
//!
//! This crate defines the "port" (the `IntentClassifier` trait) that the
//! infrastructure layer implements, plus everything that happens around a
//! classification: the bounded result cache, the per-session history store,
//! the transcript renderer and the turn-handling service. It depends only on
//! `witchat-types` -- never on `witchat-infra` or any network crate.

pub mod chat;
pub mod nlu;
