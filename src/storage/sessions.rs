//! Session repository
//!
//! Owns the collection of chat sessions, their ordering, and the pointer
//! to the current one. Every mutating operation re-serializes the full
//! collection through the store adapter before it returns, so a reload
//! sees the same state the running process does.
//!
//! In-memory state is the source of truth for the running process: a
//! store-write failure is reported up without rolling the mutation back,
//! risking at most a loss across restarts.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::storage::store::KeyValueStore;
use crate::storage::{keys, StorageError};
use crate::types::message::Message;
use crate::types::session::ChatSession;

/// Session repository errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Repository over the persisted session collection.
///
/// Constructed once per process and shared with the conversation engine
/// and the presentation layer.
pub struct SessionRepository {
    store: Arc<dyn KeyValueStore>,
    sessions: Vec<ChatSession>,
    current: Option<String>,
}

impl SessionRepository {
    /// Load the repository from the store.
    ///
    /// A missing or corrupt sessions blob starts the repository empty
    /// rather than failing; a current-session pointer that references no
    /// existing session is dropped.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let sessions: Vec<ChatSession> = match store.get(keys::SESSIONS) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("discarding corrupt session collection: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let current = store
            .get(keys::CURRENT_SESSION)
            .filter(|id| sessions.iter().any(|s| &s.id == id));

        tracing::debug!(count = sessions.len(), "loaded session collection");
        Self {
            store,
            sessions,
            current,
        }
    }

    /// All sessions, most-recently-created first
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Id of the current session, if one is selected
    pub fn current_session_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Look up a session by id
    pub fn get(&self, session_id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    /// Create a session seeded with `first_message`, insert it at the
    /// head of the list, and make it current.
    pub fn create_session(&mut self, first_message: Message) -> Result<&ChatSession, SessionError> {
        let id = self.next_session_id();
        let session = ChatSession::new(id.clone(), first_message);

        self.sessions.insert(0, session);
        self.current = Some(id.clone());
        tracing::info!(session = %id, "created session");

        self.persist_sessions()?;
        self.persist_current()?;
        Ok(&self.sessions[0])
    }

    /// Append `message` to the session with `session_id`.
    ///
    /// Messages are append-only; nothing already in the session is
    /// reordered or rewritten.
    pub fn append_message(
        &mut self,
        session_id: &str,
        message: Message,
    ) -> Result<&ChatSession, SessionError> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        self.sessions[index].messages.push(message);
        self.persist_sessions()?;
        Ok(&self.sessions[index])
    }

    /// Make the session with `session_id` current
    pub fn select_session(&mut self, session_id: &str) -> Result<&ChatSession, SessionError> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        self.current = Some(session_id.to_string());
        self.persist_current()?;
        Ok(&self.sessions[index])
    }

    /// Remove the session with `session_id`.
    ///
    /// Idempotent: deleting an absent session is a no-op. If the deleted
    /// session was current, the current pointer is cleared.
    pub fn delete_session(&mut self, session_id: &str) -> Result<(), SessionError> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != session_id);
        if self.sessions.len() == before {
            return Ok(());
        }
        // All in-memory mutation happens before any persist call, so a
        // failed write never leaves the pointer at a removed session.
        let was_current = self.current.as_deref() == Some(session_id);
        if was_current {
            self.current = None;
        }
        tracing::info!(session = %session_id, "deleted session");

        self.persist_sessions()?;
        if was_current {
            self.persist_current()?;
        }
        Ok(())
    }

    /// Clear the current-session pointer, e.g. when starting a fresh
    /// conversation that has no session until its first message.
    pub fn clear_current(&mut self) -> Result<(), SessionError> {
        self.current = None;
        self.persist_current()?;
        Ok(())
    }

    /// Generate a unique time-derived session id.
    ///
    /// Millisecond timestamps collide when sessions are created back to
    /// back, so the candidate is bumped until it is free.
    fn next_session_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.sessions.iter().any(|s| s.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn persist_sessions(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.sessions)?;
        self.store.set(keys::SESSIONS, &json)
    }

    fn persist_current(&self) -> Result<(), StorageError> {
        match &self.current {
            Some(id) => self.store.set(keys::CURRENT_SESSION, id),
            None => self.store.remove(keys::CURRENT_SESSION),
        }
    }
}
