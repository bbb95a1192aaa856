//! Session management commands
use serde::{Deserialize, Serialize};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub message_count: usize,
    pub is_active: bool,
    pub awaiting_reply: bool,
}

impl SessionInfo {
    fn from_session(session: agrichat_core::ChatSession, is_active: bool) -> Self {
        let message_count = session.message_count();
        Self {
            id: session.id,
            title: session.title,
            created_at: session.created_at,
            message_count,
            is_active,
            awaiting_reply: session.awaiting_reply,
        }
    }
}

pub fn list_sessions(state: &AppState) -> CommandResult<Vec<SessionInfo>> {
    let active_id = state.assistant().store().active_session_id();

    state
        .with_assistant(|assistant| Ok(assistant.list_sessions()))
        .map(|sessions| {
            sessions
                .into_iter()
                .map(|s| {
                    let is_active = active_id.as_deref() == Some(s.id.as_str());
                    SessionInfo::from_session(s, is_active)
                })
                .collect()
        })
        .into()
}

pub fn get_active_session(state: &AppState) -> CommandResult<SessionInfo> {
    state
        .with_assistant(|assistant| assistant.active_session())
        .map(|session| SessionInfo::from_session(session, true))
        .into()
}

pub fn create_session(state: &AppState) -> CommandResult<SessionInfo> {
    state
        .with_assistant(|assistant| assistant.create_session())
        .map(|session| SessionInfo::from_session(session, true))
        .into()
}

pub fn select_session(state: &AppState, session_id: &str) -> CommandResult<SessionInfo> {
    state
        .resolve_session(Some(session_id))
        .map(|session| SessionInfo::from_session(session, true))
        .into()
}
