//! Chat service orchestrating one conversation turn.
//!
//! A turn reads the session's history, classifies the utterance (through the
//! bounded cache), decides the text to show for the outcome, and appends the
//! turn to the session. Classification failures never abort a turn: they are
//! logged and recorded with the configured fallback text.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use witchat_types::config::ChatConfig;
use witchat_types::conversation::ConversationHistory;
use witchat_types::error::{ClassifierError, SessionError};
use witchat_types::intent::{Classification, IntentOutcome};

use crate::nlu::cache::ClassificationCache;
use crate::nlu::classifier::IntentClassifier;

use super::session::ChatSession;

/// Decides what text the transcript shows for a classification outcome.
#[derive(Debug, Clone)]
pub struct ResponsePolicy {
    fallback: String,
}

impl ResponsePolicy {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    /// The intent name when one was found; the fallback text otherwise.
    ///
    /// "No intent" and "failed" deliberately read the same in the transcript.
    pub fn display_text(&self, outcome: &IntentOutcome) -> String {
        match outcome {
            IntentOutcome::Classified { intent } => intent.name.clone(),
            IntentOutcome::NoIntent | IntentOutcome::Failed { .. } => self.fallback.clone(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

/// What happened during one turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub user_utterance: String,
    pub response: String,
    pub outcome: IntentOutcome,
    /// Whether the classification came from the cache.
    pub cached: bool,
    /// Number of turns in the session after this one.
    pub turn_count: usize,
}

/// Orchestrates classification and history updates.
///
/// Generic over `IntentClassifier` so the core never depends on a concrete
/// NLU backend.
pub struct ChatService<C: IntentClassifier> {
    classifier: C,
    cache: ClassificationCache,
    policy: ResponsePolicy,
}

impl<C: IntentClassifier> ChatService<C> {
    pub fn new(classifier: C, cache: ClassificationCache, policy: ResponsePolicy) -> Self {
        Self {
            classifier,
            cache,
            policy,
        }
    }

    /// Build a service from configuration.
    pub fn from_config(classifier: C, config: &ChatConfig) -> Self {
        Self::new(
            classifier,
            ClassificationCache::new(&config.cache),
            ResponsePolicy::new(config.fallback_response.clone()),
        )
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn policy(&self) -> &ResponsePolicy {
        &self.policy
    }

    /// Classify through the cache. Returns the result and whether it was a hit.
    ///
    /// Only successful classifications are cached.
    pub async fn classify(
        &self,
        utterance: &str,
        history: &ConversationHistory,
    ) -> (Result<Arc<Classification>, ClassifierError>, bool) {
        if let Some(hit) = self.cache.get(utterance).await {
            debug!(utterance, "classification cache hit");
            return (Ok(hit), true);
        }

        let start = Instant::now();
        let result = self.classifier.classify(utterance, history).await;
        debug!(
            utterance,
            classifier = self.classifier.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "classification cache miss"
        );

        match result {
            Ok(classification) => {
                let classification = Arc::new(classification);
                self.cache.insert(utterance, Arc::clone(&classification)).await;
                (Ok(classification), false)
            }
            Err(e) => (Err(e), false),
        }
    }

    /// Classify without touching the cache or any session.
    pub async fn classify_uncached(&self, utterance: &str) -> Result<Classification, ClassifierError> {
        self.classifier
            .classify(utterance, &ConversationHistory::new())
            .await
    }

    /// Run one turn against `session`.
    ///
    /// Rejects empty or whitespace-only input with
    /// [`SessionError::EmptyUtterance`]; the utterance is otherwise recorded
    /// exactly as typed.
    pub async fn handle_turn(
        &self,
        session: &mut ChatSession,
        utterance: &str,
    ) -> Result<TurnReport, SessionError> {
        if utterance.trim().is_empty() {
            return Err(SessionError::EmptyUtterance);
        }

        let history = session.snapshot();
        let (result, cached) = self.classify(utterance, &history).await;
        let outcome = IntentOutcome::from_result(result.as_deref());

        if let IntentOutcome::Failed { reason } = &outcome {
            warn!(session_id = %session.id(), %reason, "classification failed, using fallback response");
        }

        let response = self.policy.display_text(&outcome);
        session.record_turn(utterance, &response);

        Ok(TurnReport {
            user_utterance: utterance.to_string(),
            response,
            outcome,
            cached,
            turn_count: session.store().len(),
        })
    }
}
