//! Intent classification abstractions.
//!
//! - `IntentClassifier`: RPITIT trait for concrete NLU backends
//! - `BoxIntentClassifier`: object-safe wrapper for dynamic dispatch
//! - `ClassificationCache`: bounded memo of classifications by utterance

pub mod box_classifier;
pub mod cache;
pub mod classifier;
#[cfg(any(test, feature = "test-util"))]
pub mod stub;
