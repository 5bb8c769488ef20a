//! Observability setup for witchat.

pub mod tracing_setup;
