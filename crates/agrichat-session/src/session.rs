//! Chat session data structure

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Title every session starts with, until its first user message
pub const PLACEHOLDER_TITLE: &str = "New Chat";

/// Longest title taken from a first message, in characters
pub const TITLE_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Unique identifier, fixed at creation
    pub id: String,
    /// Sidebar label
    pub title: String,
    /// Conversation in append order
    pub messages: Vec<Message>,
    /// Display timestamp of creation
    pub created_at: String,
    /// A round trip for this session is outstanding
    #[serde(default)]
    pub awaiting_reply: bool,
}

impl ChatSession {
    pub fn new(id: String, created_at: String) -> Self {
        Self {
            id,
            title: PLACEHOLDER_TITLE.to_string(),
            messages: Vec::new(),
            created_at,
            awaiting_reply: false,
        }
    }

    /// Append a message. The first message, if from the user, names the session.
    pub fn push_message(&mut self, message: Message) {
        if self.messages.is_empty() && message.is_user() {
            self.title = title_from_content(&message.content);
        }
        self.messages.push(message);
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// First [`TITLE_MAX_CHARS`] characters of `content`, with "..." when cut.
pub fn title_from_content(content: &str) -> String {
    let mut chars = content.chars();
    let prefix: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();

    if chars.next().is_some() {
        format!("{}...", prefix)
    } else {
        prefix
    }
}
