//! Configuration loader for witchat.
//!
//! Reads `config.toml` from the data directory (`~/.witchat/` in production)
//! and deserializes it into [`ChatConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use witchat_types::config::ChatConfig;
use witchat_types::error::ConfigError;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ChatConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(data_dir: &Path) -> ChatConfig {
    match try_load_config(data_dir).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!(
                "No {CONFIG_FILE_NAME} found in {}, using defaults",
                data_dir.display()
            );
            ChatConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ChatConfig::default()
        }
    }
}

/// Strict variant of [`load_config`]: `Ok(None)` when the file is absent,
/// an error when it cannot be read or parsed.
pub async fn try_load_config(data_dir: &Path) -> Result<Option<ChatConfig>, ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE_NAME);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read(format!("{}: {err}", config_path.display())));
        }
    };

    toml::from_str::<ChatConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse(format!("{}: {err}", config_path.display())))
}
