//! Multi-session chat assistant
//!
//! Owns the session store and the inference client. Views read state from
//! here and trigger mutations through it, they hold none of their own.

use std::sync::Arc;

use agrichat_inference::{HttpInferenceClient, InferenceApi};
use agrichat_session::{ChatSession, SessionStore};
use agrichat_storage::Database;

use crate::config::Config;
use crate::error::CoreError;
use crate::round_trip::{self, Replies, CONNECTION_ERROR_PREFIX, DEFAULT_REPLY};
use crate::Result;

pub struct Assistant {
    config: Config,
    store: SessionStore,
    api: Arc<dyn InferenceApi>,
}

impl Assistant {
    /// Open the database and build the HTTP client described by `config`
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let db = Database::open(&config.database_path)?;
        let store = SessionStore::new(Arc::new(db)).with_storage_key(config.storage_key.clone());
        let api = HttpInferenceClient::new(&config.api_url, config.request_timeout())?;

        Ok(Self::with_parts(config, store, Arc::new(api)))
    }

    pub fn with_parts(config: Config, store: SessionStore, api: Arc<dyn InferenceApi>) -> Self {
        Self { config, store, api }
    }

    /// Load sessions, seeding one if storage is empty. Returns the active session.
    pub fn initialize(&self) -> Result<ChatSession> {
        let session = self.store.initialize()?;

        tracing::info!(
            session_id = %session.id,
            session_count = self.store.session_count(),
            "Assistant initialized"
        );

        Ok(session)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// A client for the single-thread `/ask` variant, sharing this transport
    pub fn quick_chat(&self) -> Result<crate::QuickChat> {
        crate::QuickChat::new(Arc::clone(&self.api))
    }

    // === Session operations ===

    pub fn create_session(&self) -> Result<ChatSession> {
        Ok(self.store.create_session()?)
    }

    pub fn select_session(&self, session_id: &str) -> Option<ChatSession> {
        self.store.select_session(session_id)
    }

    pub fn list_sessions(&self) -> Vec<ChatSession> {
        self.store.sessions()
    }

    pub fn active_session(&self) -> Result<ChatSession> {
        Ok(self.store.active_session()?)
    }

    pub fn get_session(&self, session_id: &str) -> Result<ChatSession> {
        Ok(self.store.get_session(session_id)?)
    }

    // === Conversation ===

    /// Send `text` in the active session and wait for the reply.
    ///
    /// The target is fixed when the call starts. Transport failures become an
    /// assistant message, they are not returned as errors.
    pub async fn send(&self, text: &str) -> Result<ChatSession> {
        if text.trim().is_empty() {
            return Err(CoreError::EmptyPrompt);
        }

        let session_id = self.store.active_session()?.id;
        let api = &self.api;

        round_trip::run(
            &self.store,
            &session_id,
            text,
            Replies {
                fallback: DEFAULT_REPLY,
                error_prefix: CONNECTION_ERROR_PREFIX,
            },
            |history| async move { api.text_to_text(text, &history).await },
        )
        .await
    }
}

impl Clone for Assistant {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            api: Arc::clone(&self.api),
        }
    }
}
