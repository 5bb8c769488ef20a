//! In-memory session registry.
//!
//! Maps session IDs to their `ChatSession`. Each session sits behind its own
//! async mutex so one session's turns run serially while different sessions
//! proceed independently. The index is a `moka` cache with a time-to-idle
//! policy: a session nobody has looked up for `idle` is dropped, which is
//! how abandoned browser sessions get reclaimed.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use witchat_types::config::ServerConfig;
use witchat_types::error::SessionError;

use super::session::{ChatSession, SessionSummary};

/// Handle to one registered session.
pub type SessionHandle = Arc<Mutex<ChatSession>>;

#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Cache<Uuid, SessionHandle>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionRegistry {
    /// Build a registry. `idle` of `None` keeps sessions until removed.
    pub fn new(idle: Option<Duration>) -> Self {
        let mut builder = Cache::builder();
        if let Some(idle) = idle {
            builder = builder.time_to_idle(idle);
        }
        Self {
            sessions: builder.build(),
        }
    }

    /// `session_idle_secs = 0` disables expiry.
    pub fn from_config(config: &ServerConfig) -> Self {
        let idle = (config.session_idle_secs > 0)
            .then(|| Duration::from_secs(config.session_idle_secs));
        Self::new(idle)
    }

    /// Create and register a new empty session, returning its ID.
    pub async fn create(&self) -> Uuid {
        let session = ChatSession::new();
        let id = session.id();
        self.sessions.insert(id, Arc::new(Mutex::new(session))).await;
        tracing::info!(session_id = %id, "session created");
        id
    }

    /// Look up a session. A successful lookup resets its idle timer.
    pub async fn get(&self, id: &Uuid) -> Result<SessionHandle, SessionError> {
        self.sessions.get(id).await.ok_or(SessionError::NotFound(*id))
    }

    /// End a session and discard its state.
    pub async fn remove(&self, id: &Uuid) -> Result<(), SessionError> {
        match self.sessions.remove(id).await {
            Some(_) => {
                tracing::info!(session_id = %id, "session ended");
                Ok(())
            }
            None => Err(SessionError::NotFound(*id)),
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.sessions.contains_key(id)
    }

    /// Number of live sessions, after applying pending evictions.
    pub async fn len(&self) -> usize {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count() as usize
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Summaries of all sessions, oldest first.
    pub async fn summaries(&self) -> Vec<SessionSummary> {
        let handles: Vec<SessionHandle> = self.sessions.iter().map(|(_, handle)| handle).collect();

        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            summaries.push(handle.lock().await.summary());
        }
        summaries.sort_by_key(|s| s.created_at);
        summaries
    }
}
