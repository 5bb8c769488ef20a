//! Configuration types for witchat.
//!
//! `ChatConfig` represents the top-level `config.toml` that controls the
//! NLU endpoint, the classification cache, the fallback response text and
//! the HTTP server address.

use serde::{Deserialize, Serialize};

/// Text shown as the bot's response when no intent could be determined.
pub const DEFAULT_FALLBACK_RESPONSE: &str = "no intent found";

/// Top-level configuration.
///
/// Loaded from `~/.witchat/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub wit: WitConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Response recorded for a turn whose classification found no intent
    /// or failed.
    #[serde(default = "default_fallback_response")]
    pub fallback_response: String,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_fallback_response() -> String {
    DEFAULT_FALLBACK_RESPONSE.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            wit: WitConfig::default(),
            cache: CacheConfig::default(),
            fallback_response: default_fallback_response(),
            server: ServerConfig::default(),
        }
    }
}

/// wit.ai endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitConfig {
    #[serde(default = "default_wit_base_url")]
    pub base_url: String,

    /// Value of the `v` query parameter pinning the API version.
    #[serde(default = "default_wit_api_version")]
    pub api_version: String,

    /// Name of the environment variable holding the bearer token.
    #[serde(default = "default_wit_token_env")]
    pub token_env: String,
}

fn default_wit_base_url() -> String {
    "https://api.wit.ai".to_string()
}

fn default_wit_api_version() -> String {
    "20230215".to_string()
}

fn default_wit_token_env() -> String {
    "WitKey".to_string()
}

impl Default for WitConfig {
    fn default() -> Self {
        Self {
            base_url: default_wit_base_url(),
            api_version: default_wit_api_version(),
            token_env: default_wit_token_env(),
        }
    }
}

/// Classification cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached utterances.
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,

    /// Optional time-to-live per entry, in seconds.
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

fn default_cache_capacity() -> u64 {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: None,
        }
    }
}

/// HTTP server bind address and session lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds a session may go unused before it is dropped. 0 keeps
    /// sessions until they are deleted.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}
