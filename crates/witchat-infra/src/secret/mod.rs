//! Secret providers.
//!
//! - `env`: environment variable provider for the wit.ai bearer token

pub mod env;

pub use env::EnvSecretProvider;
