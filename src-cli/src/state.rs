//! Application state management

use agrichat_core::{Assistant, ChatSession, Config, Result};

/// State shared by every command of one invocation
pub struct AppState {
    assistant: Assistant,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            assistant: Assistant::new(config)?,
        })
    }

    #[cfg(test)]
    pub fn from_assistant(assistant: Assistant) -> Self {
        Self { assistant }
    }

    pub fn initialize(&self) -> Result<()> {
        self.assistant.initialize()?;
        Ok(())
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    pub fn with_assistant<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Assistant) -> Result<T>,
    {
        f(&self.assistant)
    }

    /// Select `session_id` if given, then return the active session.
    ///
    /// Unlike the store's silent no-op, an unknown id is reported here so a
    /// command never acts on a session the user did not ask for.
    pub fn resolve_session(&self, session_id: Option<&str>) -> Result<ChatSession> {
        if let Some(id) = session_id {
            self.assistant.get_session(id)?;
            self.assistant.select_session(id);
        }

        self.assistant.active_session()
    }
}
