//! Shared fixtures for command tests

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use agrichat_core::{
    Assistant, Config, HttpInferenceClient, KeyValueStore, MemoryStore, SessionStore,
    StorageError,
};

use crate::state::AppState;

/// Storage that reads nothing and refuses every write
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("read-only database")))
    }
}

/// In-memory state whose inference API is unreachable
pub fn offline_state() -> AppState {
    offline_state_over(Arc::new(MemoryStore::new()))
}

pub fn offline_state_over(storage: Arc<dyn KeyValueStore>) -> AppState {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let api_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let api = HttpInferenceClient::new(&api_url, Duration::from_secs(5)).unwrap();
    let state = AppState::from_assistant(Assistant::with_parts(
        Config::new(PathBuf::from("/unused")),
        SessionStore::new(storage),
        Arc::new(api),
    ));
    state.initialize().unwrap();
    state
}
