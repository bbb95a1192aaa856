//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session {0} is already awaiting a reply")]
    ReplyPending(String),

    #[error("Storage error: {0}")]
    Storage(#[from] agrichat_storage::StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No active session")]
    NoActiveSession,
}
