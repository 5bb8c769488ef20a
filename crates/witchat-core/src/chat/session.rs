//! Chat session context.
//!
//! A `ChatSession` is the explicit per-user state handed to every handler:
//! its conversation store, the last submitted input, and lifecycle
//! timestamps. Sessions live only in memory.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use witchat_types::conversation::ConversationHistory;
use witchat_types::transcript::{InterleavedEntry, TranscriptRow};

use super::store::ConversationStore;

/// Lightweight description of a session for listings.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub turn_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// State of a single chat session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    store: ConversationStore,
    /// Most recent utterance submitted in this session.
    last_input: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Start a new, empty session.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            store: ConversationStore::new(),
            last_input: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn last_input(&self) -> Option<&str> {
        self.last_input.as_deref()
    }

    /// Clear the conversation, the derived transcript and the last input.
    pub fn reset(&mut self) {
        self.store.reset();
        self.last_input = None;
        self.updated_at = Utc::now();
    }

    /// Record a completed turn.
    pub fn record_turn(&mut self, user_utterance: &str, system_response: &str) {
        self.store.append_turn(user_utterance, system_response);
        self.last_input = Some(user_utterance.to_string());
        self.updated_at = Utc::now();
    }

    pub fn snapshot(&self) -> ConversationHistory {
        self.store.snapshot()
    }

    /// Render the transcript newest first, refreshing the export list.
    pub fn render_transcript(&mut self) -> Vec<TranscriptRow> {
        self.store.render()
    }

    pub fn interleaved(&self) -> &[InterleavedEntry] {
        self.store.interleaved()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            turn_count: self.store.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
