//! Environment variable secret provider.
//!
//! Key resolution for the wit.ai token:
//! - the variable named by `wit.token_env` (default `WitKey`)
//! - then the fallback variable (`WIT_API_TOKEN`)
//!
//! Empty values count as unset. Values are wrapped in [`SecretString`]
//! immediately and never logged.

use secrecy::SecretString;

use witchat_types::config::WitConfig;

/// Fallback variable consulted when the configured one is unset.
pub const FALLBACK_TOKEN_ENV: &str = "WIT_API_TOKEN";

/// Read-only secret provider backed by environment variables.
pub struct EnvSecretProvider {
    fallback_key: String,
}

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self::with_fallback(FALLBACK_TOKEN_ENV)
    }

    pub fn with_fallback(fallback_key: impl Into<String>) -> Self {
        Self {
            fallback_key: fallback_key.into(),
        }
    }

    /// Read a single variable.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            // Secrets must be valid strings
            Err(std::env::VarError::NotUnicode(_)) => None,
        }
    }

    /// Resolve the wit.ai bearer token for `config`.
    ///
    /// Returns `None` when neither variable is set; the caller decides
    /// whether that is worth a warning.
    pub fn resolve_wit_token(&self, config: &WitConfig) -> Option<SecretString> {
        if let Some(token) = self.get(&config.token_env) {
            tracing::debug!(source = %config.token_env, "wit.ai token resolved");
            return Some(token);
        }
        let token = self.get(&self.fallback_key)?;
        tracing::debug!(source = %self.fallback_key, "wit.ai token resolved");
        Some(token)
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}
