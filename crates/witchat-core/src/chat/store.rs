//! Conversation history store.
//!
//! Owns one session's history together with the interleaved transcript
//! derived from it. Appending a turn and resetting are the only mutations.

use witchat_types::conversation::ConversationHistory;
use witchat_types::transcript::{InterleavedEntry, TranscriptRow};

use super::transcript;

#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    history: ConversationHistory,
    /// Flattened transcript from the last render, kept for export.
    interleaved: Vec<InterleavedEntry>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the history and drop the derived transcript.
    pub fn reset(&mut self) {
        self.history.reset();
        self.interleaved.clear();
    }

    pub fn append_turn(
        &mut self,
        user_utterance: impl Into<String>,
        system_response: impl Into<String>,
    ) {
        self.history.append_turn(user_utterance, system_response);
    }

    /// Owned copy of the current history.
    pub fn snapshot(&self) -> ConversationHistory {
        self.history.clone()
    }

    /// Render the full transcript (newest first) and rebuild the
    /// interleaved export list from it.
    pub fn render(&mut self) -> Vec<TranscriptRow> {
        let rows: Vec<TranscriptRow> = transcript::render(&self.history).collect();
        self.interleaved = transcript::interleave(&rows);
        rows
    }

    /// Interleaved `(is_user, text)` list from the most recent render.
    pub fn interleaved(&self) -> &[InterleavedEntry] {
        &self.interleaved
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
