//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the HTTP layer. `ChatService` is generic over the classifier; AppState
//! pins it to the type-erased [`BoxIntentClassifier`] so tests can swap in a
//! stub without touching the handlers.

use std::path::PathBuf;
use std::sync::Arc;

use witchat_core::chat::registry::SessionRegistry;
use witchat_core::chat::service::ChatService;
use witchat_core::nlu::box_classifier::BoxIntentClassifier;
use witchat_infra::config::load_config;
use witchat_infra::filesystem::resolve_data_dir;
use witchat_infra::nlu::wit::WitClassifier;
use witchat_infra::secret::EnvSecretProvider;
use witchat_types::config::ChatConfig;

pub type ConcreteChatService = ChatService<BoxIntentClassifier>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub sessions: SessionRegistry,
    pub config: Arc<ChatConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load `config.toml`, look up the wit.ai
    /// token and build the classifier.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_config(&data_dir).await;

        let token = EnvSecretProvider::new().resolve_wit_token(&config.wit);
        if token.is_none() {
            tracing::warn!(
                token_env = %config.wit.token_env,
                "no wit.ai token found; requests will be rejected and every turn will use the fallback response"
            );
        }

        let classifier = WitClassifier::new(&config.wit, token)?;
        tracing::debug!(
            data_dir = %data_dir.display(),
            base_url = %config.wit.base_url,
            api_version = %config.wit.api_version,
            "application state initialized"
        );

        Ok(Self::from_parts(
            BoxIntentClassifier::new(classifier),
            config,
            data_dir,
        ))
    }

    pub fn from_parts(classifier: BoxIntentClassifier, config: ChatConfig, data_dir: PathBuf) -> Self {
        let chat_service = ChatService::from_config(classifier, &config);
        Self {
            chat_service: Arc::new(chat_service),
            sessions: SessionRegistry::from_config(&config.server),
            config: Arc::new(config),
            data_dir,
        }
    }
}
