//! Conversation commands
use agrichat_core::{ChatSession, Message};

use super::CommandResult;
use crate::state::AppState;

/// Send in `session_id` (or the active session) and wait for the reply.
/// A failed round trip still succeeds here, the failure is in the transcript.
pub async fn send_message(
    state: &AppState,
    session_id: Option<&str>,
    text: &str,
) -> CommandResult<ChatSession> {
    if let Err(e) = state.resolve_session(session_id) {
        return CommandResult::err(e.to_string());
    }

    state.assistant().send(text).await.into()
}

pub fn get_history(state: &AppState, session_id: Option<&str>) -> CommandResult<ChatSession> {
    state.resolve_session(session_id).into()
}

/// Single-thread question, nothing is stored
pub async fn ask(state: &AppState, text: &str) -> CommandResult<Vec<Message>> {
    let chat = match state.assistant().quick_chat() {
        Ok(chat) => chat,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    chat.ask(text).await.into()
}
