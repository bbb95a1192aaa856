//! AgriChat Core
//!
//! Coordination layer: wires the session store to the inference client and
//! runs the conversation round trip.

mod assistant;
mod config;
mod error;
mod quick_chat;
mod round_trip;

pub use assistant::Assistant;
pub use config::Config;
pub use error::CoreError;
pub use quick_chat::QuickChat;
pub use round_trip::{
    ASK_CONNECTION_ERROR, ASK_DEFAULT_REPLY, CONNECTION_ERROR_PREFIX, DEFAULT_REPLY,
};

// Re-export core components
pub use agrichat_inference::{ChatReply, HttpInferenceClient, InferenceApi, InferenceError};
pub use agrichat_session::{ChatSession, Message, Role, SessionError, SessionStore};
pub use agrichat_storage::{Database, KeyValueStore, MemoryStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging to stderr. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
