//! Chat message data structure

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a conversation. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Display time, e.g. "02:05 PM"
    pub time: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            time: time.into(),
        }
    }

    pub fn user(content: impl Into<String>, time: impl Into<String>) -> Self {
        Self::new(Role::User, content, time)
    }

    pub fn assistant(content: impl Into<String>, time: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, time)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let msg = Message::user("hello", "09:00 AM");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
        assert_eq!(json["time"], "09:00 AM");
    }

    #[test]
    fn test_role_display_matches_wire() {
        for role in [Role::User, Role::Assistant] {
            assert_eq!(serde_json::to_value(role).unwrap(), role.to_string());
        }
        assert!(serde_json::from_str::<Role>(r#""system""#).is_err());
    }
}
