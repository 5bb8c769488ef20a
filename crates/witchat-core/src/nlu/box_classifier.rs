//! BoxIntentClassifier -- object-safe dynamic dispatch wrapper for IntentClassifier.
//!
//! 1. Define an object-safe `IntentClassifierDyn` trait with boxed futures
//! 2. Blanket-impl `IntentClassifierDyn` for all `T: IntentClassifier`
//! 3. `BoxIntentClassifier` wraps `Box<dyn IntentClassifierDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use witchat_types::conversation::ConversationHistory;
use witchat_types::error::ClassifierError;
use witchat_types::intent::Classification;

use super::classifier::IntentClassifier;

/// Object-safe version of [`IntentClassifier`] with boxed futures.
pub trait IntentClassifierDyn: Send + Sync {
    fn name(&self) -> &str;

    fn classify_boxed<'a>(
        &'a self,
        utterance: &'a str,
        history: &'a ConversationHistory,
    ) -> Pin<Box<dyn Future<Output = Result<Classification, ClassifierError>> + Send + 'a>>;
}

impl<T: IntentClassifier> IntentClassifierDyn for T {
    fn name(&self) -> &str {
        IntentClassifier::name(self)
    }

    fn classify_boxed<'a>(
        &'a self,
        utterance: &'a str,
        history: &'a ConversationHistory,
    ) -> Pin<Box<dyn Future<Output = Result<Classification, ClassifierError>> + Send + 'a>> {
        Box::pin(self.classify(utterance, history))
    }
}

/// Type-erased classifier for runtime backend selection.
///
/// Since `IntentClassifier` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxIntentClassifier` delegates to the inner
/// `IntentClassifierDyn` trait object and implements `IntentClassifier`
/// itself, so services can be pinned to it.
pub struct BoxIntentClassifier {
    inner: Box<dyn IntentClassifierDyn + Send + Sync>,
}

impl BoxIntentClassifier {
    /// Wrap a concrete `IntentClassifier` in a type-erased box.
    pub fn new<T: IntentClassifier + 'static>(classifier: T) -> Self {
        Self {
            inner: Box::new(classifier),
        }
    }
}

impl IntentClassifier for BoxIntentClassifier {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn classify(
        &self,
        utterance: &str,
        history: &ConversationHistory,
    ) -> Result<Classification, ClassifierError> {
        self.inner.classify_boxed(utterance, history).await
    }
}
