//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] agrichat_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] agrichat_session::SessionError),

    #[error("Inference error: {0}")]
    Inference(#[from] agrichat_inference::InferenceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Message cannot be empty")]
    EmptyPrompt,
}
