//! Display-side transcript types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who a transcript row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Bot,
    User,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Bot => write!(f, "bot"),
            Speaker::User => write!(f, "user"),
        }
    }
}

/// One message bubble in the rendered transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRow {
    pub speaker: Speaker,
    pub text: String,
    /// Stable per-render key: `ai_{idx}` or `human_{idx}`, where `idx`
    /// counts turns from the newest (0).
    pub key: String,
}

impl TranscriptRow {
    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}

/// Flattened transcript entry kept for export.
///
/// Serializes as a two-element array `[is_user, text]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterleavedEntry(pub bool, pub String);

impl InterleavedEntry {
    pub fn is_user(&self) -> bool {
        self.0
    }

    pub fn text(&self) -> &str {
        &self.1
    }
}

impl From<&TranscriptRow> for InterleavedEntry {
    fn from(row: &TranscriptRow) -> Self {
        InterleavedEntry(row.is_user(), row.text.clone())
    }
}
