//! In-memory classifier for tests.
//!
//! Answers from a fixed utterance -> result table and counts calls, so tests
//! can assert on cache behaviour without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use witchat_types::conversation::ConversationHistory;
use witchat_types::error::ClassifierError;
use witchat_types::intent::{Classification, Intent};

use super::classifier::IntentClassifier;

/// Scripted classifier. Clones share the same table and counters.
///
/// Utterances without a scripted answer classify to an empty intent list.
#[derive(Clone, Default)]
pub struct StubClassifier {
    answers: Arc<Mutex<HashMap<String, Result<Classification, ClassifierError>>>>,
    calls: Arc<AtomicUsize>,
    history_lens: Arc<Mutex<Vec<usize>>>,
}

impl StubClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `utterance` with a single intent.
    pub fn with_intent(self, utterance: &str, name: &str, confidence: f64) -> Self {
        let classification = Classification {
            text: Some(utterance.to_string()),
            intents: vec![Intent {
                id: None,
                name: name.to_string(),
                confidence,
            }],
            ..Default::default()
        };
        self.with_classification(utterance, classification)
    }

    pub fn with_classification(self, utterance: &str, classification: Classification) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert(utterance.to_string(), Ok(classification));
        self
    }

    /// Fail every classification of `utterance` with `error`.
    pub fn with_error(self, utterance: &str, error: ClassifierError) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert(utterance.to_string(), Err(error));
        self
    }

    /// Number of `classify` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// History length seen by each call, in call order.
    pub fn history_lens(&self) -> Vec<usize> {
        self.history_lens.lock().unwrap().clone()
    }
}

impl IntentClassifier for StubClassifier {
    fn name(&self) -> &str {
        "stub"
    }

    async fn classify(
        &self,
        utterance: &str,
        history: &ConversationHistory,
    ) -> Result<Classification, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.history_lens.lock().unwrap().push(history.len());

        self.answers
            .lock()
            .unwrap()
            .get(utterance)
            .cloned()
            .unwrap_or_else(|| {
                Ok(Classification {
                    text: Some(utterance.to_string()),
                    ..Default::default()
                })
            })
    }
}
