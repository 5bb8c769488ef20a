//! NLU classification types.
//!
//! These types model what an intent classifier returns for one utterance
//! and how a single turn's classification resolved.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A candidate intent returned by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub confidence: f64,
}

/// The decoded result of classifying one utterance.
///
/// `intents` keeps the order the service returned (best first). Entities
/// and traits are passed through verbatim because their value shapes depend
/// on the entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Text the service actually classified (after transliteration).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub entities: BTreeMap<String, Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub traits: BTreeMap<String, Vec<serde_json::Value>>,
}

impl Classification {
    /// The top-ranked intent, i.e. the first entry the service returned.
    pub fn top_intent(&self) -> Option<&Intent> {
        self.intents.first()
    }
}

/// How one turn's classification resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntentOutcome {
    /// The classifier named an intent.
    Classified { intent: Intent },
    /// The classifier answered, but with an empty intent list.
    NoIntent,
    /// The call or the response decoding failed.
    Failed { reason: String },
}

impl IntentOutcome {
    /// Resolve a classifier result into an outcome.
    pub fn from_result<E: fmt::Display>(result: Result<&Classification, E>) -> Self {
        match result {
            Ok(classification) => match classification.top_intent() {
                Some(intent) => IntentOutcome::Classified {
                    intent: intent.clone(),
                },
                None => IntentOutcome::NoIntent,
            },
            Err(e) => IntentOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    /// The intent name, when one was found.
    pub fn intent_name(&self) -> Option<&str> {
        match self {
            IntentOutcome::Classified { intent } => Some(&intent.name),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, IntentOutcome::Failed { .. })
    }
}
