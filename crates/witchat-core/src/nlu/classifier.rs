//! IntentClassifier trait definition.
//!
//! This is the core abstraction that all NLU backends implement.

use witchat_types::conversation::ConversationHistory;
use witchat_types::error::ClassifierError;
use witchat_types::intent::Classification;

/// Trait for NLU backends (wit.ai, test stubs, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in witchat-infra (e.g., `WitClassifier`).
pub trait IntentClassifier: Send + Sync {
    /// Human-readable backend name (e.g., "wit").
    fn name(&self) -> &str;

    /// Classify one utterance.
    ///
    /// `history` holds the turns completed before this one. Backends that
    /// classify utterances in isolation may ignore it.
    fn classify(
        &self,
        utterance: &str,
        history: &ConversationHistory,
    ) -> impl std::future::Future<Output = Result<Classification, ClassifierError>> + Send;
}
