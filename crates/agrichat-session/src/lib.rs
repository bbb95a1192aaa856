//! AgriChat Session Management
//!
//! - A session is one conversation thread with its own title and history
//! - Sessions are kept newest-first, exactly one is active once initialized
//! - Every mutation rewrites the full collection to storage
//! - Sessions are local-only (no cross-device sync)

mod clock;
mod error;
mod message;
mod session;
mod store;

pub use clock::{
    format_created_at, format_message_time, Clock, FixedClock, IdGenerator, SequentialIds,
    SystemClock, UuidIds,
};
pub use error::SessionError;
pub use message::{Message, Role};
pub use session::{title_from_content, ChatSession, PLACEHOLDER_TITLE, TITLE_MAX_CHARS};
pub use store::{SessionStore, DEFAULT_STORAGE_KEY};

pub type Result<T> = std::result::Result<T, SessionError>;
