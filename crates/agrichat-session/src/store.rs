//! Session Store
//!
//! Owns the newest-first session collection and the active session id.
//! Every mutation writes the complete collection back to storage.

use parking_lot::RwLock;
use std::sync::Arc;

use agrichat_storage::KeyValueStore;

use crate::clock::{format_created_at, format_message_time, Clock, IdGenerator, SystemClock, UuidIds};
use crate::error::SessionError;
use crate::message::{Message, Role};
use crate::session::ChatSession;
use crate::Result;

/// Storage key holding the serialized collection
pub const DEFAULT_STORAGE_KEY: &str = "chatSessions";

#[derive(Debug, Default)]
struct StoreState {
    /// Newest first
    sessions: Vec<ChatSession>,
    /// Always names a member of `sessions` when set
    active_id: Option<String>,
}

impl StoreState {
    fn position(&self, session_id: &str) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == session_id)
    }

    fn active(&self) -> Option<&ChatSession> {
        let id = self.active_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }
}

/// What a mutation does to memory when its write fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rollback {
    Restore,
    Keep,
}

pub struct SessionStore {
    state: Arc<RwLock<StoreState>>,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    storage_key: String,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_ports(storage, Arc::new(SystemClock), Arc::new(UuidIds))
    }

    pub fn with_ports(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            storage,
            clock,
            ids,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Restore the collection from storage, or seed it with one new session.
    /// Returns the active session.
    pub fn initialize(&self) -> Result<ChatSession> {
        let Some(mut sessions) = self.load_snapshot()? else {
            let session = self.seed();
            tracing::info!(session_id = %session.id, "Seeded new chat session");
            return Ok(session);
        };

        // Nothing can still be in flight after a reload
        for session in sessions.iter_mut().filter(|s| s.awaiting_reply) {
            tracing::debug!(session_id = %session.id, "Clearing stale awaiting-reply flag");
            session.awaiting_reply = false;
        }

        let active = sessions[0].clone();
        {
            let mut state = self.state.write();
            state.sessions = sessions;
            state.active_id = Some(active.id.clone());
        }

        tracing::info!(
            session_id = %active.id,
            session_count = self.session_count(),
            "Restored chat sessions"
        );

        Ok(active)
    }

    /// Stored collection, `None` when absent, empty or unreadable
    fn load_snapshot(&self) -> Result<Option<Vec<ChatSession>>> {
        let Some(raw) = self.storage.read(&self.storage_key)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<ChatSession>>(&raw) {
            Ok(sessions) if sessions.is_empty() => Ok(None),
            Ok(sessions) => Ok(Some(sessions)),
            Err(e) => {
                tracing::warn!(
                    key = %self.storage_key,
                    error = %e,
                    "Discarding malformed stored sessions"
                );
                Ok(None)
            }
        }
    }

    /// Seed one session. A failed write is logged, the session is still usable
    /// and lands in storage with the next successful write.
    fn seed(&self) -> ChatSession {
        let session = self.new_session();
        let mut state = self.state.write();
        state.sessions = vec![session.clone()];
        state.active_id = Some(session.id.clone());

        if let Err(e) = self.persist(&state.sessions) {
            tracing::error!(session_id = %session.id, error = %e, "Failed to save seeded session");
        }

        session
    }

    fn new_session(&self) -> ChatSession {
        ChatSession::new(self.ids.next_id(), format_created_at(self.clock.now()))
    }

    /// Create a session, put it first and make it active.
    /// Nothing changes if the write fails.
    pub fn create_session(&self) -> Result<ChatSession> {
        let session = self.new_session();

        {
            let mut state = self.state.write();
            state.sessions.insert(0, session.clone());
            let previous = state.active_id.replace(session.id.clone());

            if let Err(e) = self.persist(&state.sessions) {
                state.sessions.remove(0);
                state.active_id = previous;
                return Err(e);
            }
        }

        tracing::info!(session_id = %session.id, "Created new chat session");

        Ok(session)
    }

    /// Make `session_id` active. An unknown id leaves everything as it was.
    /// Returns the active session after the call.
    pub fn select_session(&self, session_id: &str) -> Option<ChatSession> {
        let mut state = self.state.write();

        if state.position(session_id).is_some() {
            state.active_id = Some(session_id.to_string());
            tracing::debug!(session_id = %session_id, "Selected chat session");
        } else {
            tracing::debug!(session_id = %session_id, "Ignoring selection of unknown session");
        }

        state.active().cloned()
    }

    /// Append `message` to a session without moving it in the list.
    /// Nothing changes if the write fails.
    pub fn append_message(&self, session_id: &str, message: Message) -> Result<ChatSession> {
        self.update_session(session_id, Rollback::Restore, |session| {
            session.push_message(message);
            Ok(())
        })
    }

    /// Append the user's message and mark the session as waiting on the
    /// inference API. Fails if a reply is already outstanding for it.
    /// Nothing changes if the write fails.
    pub fn begin_reply(&self, session_id: &str, message: Message) -> Result<ChatSession> {
        self.update_session(session_id, Rollback::Restore, |session| {
            if session.awaiting_reply {
                return Err(SessionError::ReplyPending(session_id.to_string()));
            }
            session.push_message(message);
            session.awaiting_reply = true;
            Ok(())
        })
    }

    /// Deliver the assistant's message and clear the awaiting flag.
    ///
    /// If the write fails the error is returned but the reply stays in memory
    /// and the flag stays cleared, so the session can take the next message.
    pub fn finish_reply(&self, session_id: &str, message: Message) -> Result<ChatSession> {
        self.update_session(session_id, Rollback::Keep, |session| {
            session.push_message(message);
            session.awaiting_reply = false;
            Ok(())
        })
    }

    /// Clear the awaiting flag of a round trip that ended without a reply.
    /// Write failures are logged only.
    pub fn abandon_reply(&self, session_id: &str) {
        let result = self.update_session(session_id, Rollback::Keep, |session| {
            session.awaiting_reply = false;
            Ok(())
        });

        match result {
            Ok(_) => tracing::warn!(session_id = %session_id, "Round trip abandoned"),
            Err(e) => tracing::error!(
                session_id = %session_id,
                error = %e,
                "Failed to clear awaiting-reply flag"
            ),
        }
    }

    fn update_session<F>(&self, session_id: &str, rollback: Rollback, f: F) -> Result<ChatSession>
    where
        F: FnOnce(&mut ChatSession) -> Result<()>,
    {
        let mut state = self.state.write();
        let index = state
            .position(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        let mut session = state.sessions[index].clone();
        f(&mut session)?;
        let previous = std::mem::replace(&mut state.sessions[index], session.clone());

        if let Err(e) = self.persist(&state.sessions) {
            if rollback == Rollback::Restore {
                state.sessions[index] = previous;
            }
            return Err(e);
        }

        tracing::debug!(
            session_id = %session.id,
            message_count = session.message_count(),
            awaiting_reply = session.awaiting_reply,
            "Updated chat session"
        );

        Ok(session)
    }

    /// Called with the write lock held so snapshots land in mutation order.
    fn persist(&self, sessions: &[ChatSession]) -> Result<()> {
        let json = serde_json::to_string(sessions)?;
        self.storage.write(&self.storage_key, &json).map_err(|e| {
            tracing::error!(key = %self.storage_key, error = %e, "Failed to persist sessions");
            SessionError::from(e)
        })
    }

    pub fn user_message(&self, content: impl Into<String>) -> Message {
        Message::new(Role::User, content, format_message_time(self.clock.now()))
    }

    pub fn assistant_message(&self, content: impl Into<String>) -> Message {
        Message::new(Role::Assistant, content, format_message_time(self.clock.now()))
    }

    /// All sessions, newest first
    pub fn sessions(&self) -> Vec<ChatSession> {
        self.state.read().sessions.clone()
    }

    pub fn session_count(&self) -> usize {
        self.state.read().sessions.len()
    }

    pub fn get_session(&self, session_id: &str) -> Result<ChatSession> {
        let state = self.state.read();
        state
            .position(session_id)
            .map(|i| state.sessions[i].clone())
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.state.read().active_id.clone()
    }

    pub fn active_session(&self) -> Result<ChatSession> {
        self.state
            .read()
            .active()
            .cloned()
            .ok_or(SessionError::NoActiveSession)
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            storage: Arc::clone(&self.storage),
            clock: Arc::clone(&self.clock),
            ids: Arc::clone(&self.ids),
            storage_key: self.storage_key.clone(),
        }
    }
}
