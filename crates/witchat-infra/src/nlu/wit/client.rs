//! WitClassifier -- concrete [`IntentClassifier`] implementation for wit.ai.
//!
//! Sends `GET {base_url}/message?v={api_version}&q={text}` with a bearer
//! token. The utterance is transliterated to ASCII first. No retries and no
//! timeout override: the HTTP client's defaults apply.
//!
//! The token is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use witchat_core::nlu::classifier::IntentClassifier;
use witchat_types::config::WitConfig;
use witchat_types::conversation::ConversationHistory;
use witchat_types::error::ClassifierError;
use witchat_types::intent::Classification;

use super::types::{WitErrorBody, WitMessageResponse};
use crate::nlu::transliterate::to_ascii;

/// wit.ai intent classifier.
///
/// Each utterance is classified on its own; the conversation history is
/// not sent to the service.
pub struct WitClassifier {
    client: reqwest::Client,
    token: Option<SecretString>,
    base_url: String,
    api_version: String,
}

impl WitClassifier {
    /// Create a classifier for the configured endpoint.
    ///
    /// A `None` token is accepted: requests then go out without an
    /// `Authorization` header and the service rejects them.
    pub fn new(config: &WitConfig, token: Option<SecretString>) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ClassifierError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn message_url(&self) -> String {
        format!("{}/message", self.base_url.trim_end_matches('/'))
    }

    async fn send(&self, utterance: &str) -> Result<Classification, ClassifierError> {
        let query = to_ascii(utterance);

        let mut request = self
            .client
            .get(self.message_url())
            .query(&[("v", self.api_version.as_str()), ("q", query.as_str())]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::Transport(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => ClassifierError::AuthenticationFailed,
                429 => ClassifierError::RateLimited,
                code => ClassifierError::HttpStatus {
                    status: code,
                    body: serde_json::from_str::<WitErrorBody>(&body)
                        .map(|e| e.error)
                        .unwrap_or(body),
                },
            });
        }

        let parsed: WitMessageResponse = serde_json::from_str(&body).map_err(|e| {
            ClassifierError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        Ok(parsed.into())
    }
}

impl IntentClassifier for WitClassifier {
    fn name(&self) -> &str {
        "wit"
    }

    async fn classify(
        &self,
        utterance: &str,
        _history: &ConversationHistory,
    ) -> Result<Classification, ClassifierError> {
        let span = tracing::info_span!(
            "nlu.classify",
            "nlu.provider" = "wit",
            "nlu.api_version" = %self.api_version,
            "nlu.intent_count" = tracing::field::Empty,
        );

        let result = self.send(utterance).instrument(span.clone()).await;
        if let Ok(classification) = &result {
            span.record("nlu.intent_count", classification.intents.len());
        }
        result
    }
}
