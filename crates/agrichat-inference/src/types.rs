//! Wire types

use agrichat_session::Message;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct TextToTextRequest<'a> {
    pub prompt: &'a str,
    pub history: &'a [Message],
}

#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub query: &'a str,
}

/// Response of both endpoints. The service reports failures as `{"error": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatReply {
    /// The reply text as sent, or `fallback` when it is missing or empty
    pub fn text_or(&self, fallback: &str) -> String {
        match self.reply.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => fallback.to_string(),
        }
    }
}
