//! Infrastructure layer for witchat.
//!
//! Contains implementations of the traits defined in `witchat-core`:
//! the wit.ai intent classifier, plus the environment-facing pieces
//! (configuration file loading, data directory resolution, bearer token
//! lookup, transcript export files).

pub mod config;
pub mod filesystem;
pub mod nlu;
pub mod secret;
