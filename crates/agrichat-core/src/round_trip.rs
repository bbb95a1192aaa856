//! Conversation round trip
//!
//! The user message is appended before the request goes out, and exactly one
//! assistant message is appended when it resolves, whatever the outcome.

use std::future::Future;

use agrichat_inference::ChatReply;
use agrichat_session::{ChatSession, Message, SessionStore};

use crate::Result;

/// Reply content when the multi-session endpoint answers without text
pub const DEFAULT_REPLY: &str = "I'm here to assist you with AI operations.";

/// Prefix of the diagnostic message appended when a round trip fails
pub const CONNECTION_ERROR_PREFIX: &str = "Error connecting to AI API";

/// Reply content when the single-thread endpoint answers without text
pub const ASK_DEFAULT_REPLY: &str = "I'm here to help with agriculture queries!";

/// Prefix of the single-thread diagnostic message
pub const ASK_CONNECTION_ERROR: &str = "Unable to connect to AI server";

/// Clears the awaiting flag if the round trip is dropped before its reply
struct PendingReply<'a> {
    store: &'a SessionStore,
    session_id: &'a str,
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        self.store.abandon_reply(self.session_id);
    }
}

pub(crate) struct Replies {
    pub fallback: &'static str,
    pub error_prefix: &'static str,
}

/// Run one round trip against `session_id`. The reply lands in that session
/// even if another session has been selected in the meantime.
pub(crate) async fn run<F, Fut>(
    store: &SessionStore,
    session_id: &str,
    text: &str,
    replies: Replies,
    call: F,
) -> Result<ChatSession>
where
    F: FnOnce(Vec<Message>) -> Fut,
    Fut: Future<Output = agrichat_inference::Result<ChatReply>>,
{
    let pending = store.begin_reply(session_id, store.user_message(text))?;
    let guard = PendingReply { store, session_id };

    tracing::info!(
        session_id = %session_id,
        message_count = pending.message_count(),
        "Sending message"
    );

    let content = match call(pending.messages).await {
        Ok(reply) => reply.text_or(replies.fallback),
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "Round trip failed");
            format!("{}: {}", replies.error_prefix, e)
        }
    };

    std::mem::forget(guard);
    let session = store.finish_reply(session_id, store.assistant_message(content))?;

    tracing::info!(
        session_id = %session_id,
        message_count = session.message_count(),
        "Received reply"
    );

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrichat_storage::MemoryStore;
    use std::sync::Arc;

    fn replies() -> Replies {
        Replies {
            fallback: DEFAULT_REPLY,
            error_prefix: CONNECTION_ERROR_PREFIX,
        }
    }

    #[tokio::test]
    async fn test_cancelled_round_trip_clears_flag() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        let session = store.initialize().unwrap();

        let task = {
            let store = store.clone();
            let session_id = session.id.clone();
            tokio::spawn(async move {
                run(&store, &session_id, "Is it too late to plant garlic?", replies(), |_| {
                    std::future::pending::<agrichat_inference::Result<ChatReply>>()
                })
                .await
            })
        };

        while !store.get_session(&session.id).unwrap().awaiting_reply {
            tokio::task::yield_now().await;
        }

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        let after = store.get_session(&session.id).unwrap();
        assert!(!after.awaiting_reply);
        assert_eq!(after.message_count(), 1);

        // The session takes the next message
        let finished = run(&store, &session.id, "Try again", replies(), |_| async {
            Ok(ChatReply {
                reply: Some("Plant before the ground freezes.".to_string()),
                error: None,
            })
        })
        .await
        .unwrap();
        assert_eq!(finished.message_count(), 3);
        assert!(!finished.awaiting_reply);
    }

    #[tokio::test]
    async fn test_reply_text_is_stored_as_sent() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        let session = store.initialize().unwrap();
        let text = "    let x = 1;\n\nUse neem oil.\n";

        let finished = run(&store, &session.id, "Show me", replies(), |_| async move {
            Ok(ChatReply {
                reply: Some(text.to_string()),
                error: None,
            })
        })
        .await
        .unwrap();

        assert_eq!(finished.messages[1].content, text);
    }
}
