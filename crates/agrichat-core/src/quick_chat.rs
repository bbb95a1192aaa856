//! Single-thread chat
//!
//! One ephemeral session held in memory, talking to the `/ask` endpoint.
//! Nothing is persisted and there is no history on the wire.

use std::sync::Arc;

use agrichat_inference::InferenceApi;
use agrichat_session::{Message, SessionStore};
use agrichat_storage::MemoryStore;

use crate::error::CoreError;
use crate::round_trip::{self, Replies, ASK_CONNECTION_ERROR, ASK_DEFAULT_REPLY};
use crate::Result;

pub struct QuickChat {
    store: SessionStore,
    session_id: String,
    api: Arc<dyn InferenceApi>,
}

impl QuickChat {
    pub fn new(api: Arc<dyn InferenceApi>) -> Result<Self> {
        Self::with_store(SessionStore::new(Arc::new(MemoryStore::new())), api)
    }

    /// `store` should sit on volatile storage, it is initialized here
    pub fn with_store(store: SessionStore, api: Arc<dyn InferenceApi>) -> Result<Self> {
        let session = store.initialize()?;

        Ok(Self {
            store,
            session_id: session.id,
            api,
        })
    }

    /// Send one question. Blank input is rejected.
    pub async fn ask(&self, query: &str) -> Result<Vec<Message>> {
        if query.trim().is_empty() {
            return Err(CoreError::EmptyPrompt);
        }

        let api = &self.api;
        let session = round_trip::run(
            &self.store,
            &self.session_id,
            query,
            Replies {
                fallback: ASK_DEFAULT_REPLY,
                error_prefix: ASK_CONNECTION_ERROR,
            },
            |_history| async move { api.ask(query).await },
        )
        .await?;

        Ok(session.messages)
    }

    pub fn messages(&self) -> Vec<Message> {
        self.store
            .get_session(&self.session_id)
            .map(|s| s.messages)
            .unwrap_or_default()
    }
}
