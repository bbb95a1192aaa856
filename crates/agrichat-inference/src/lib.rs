//! AgriChat Inference Client
//!
//! The remote inference service is an opaque request/response boundary:
//! - `POST /text_to_text` with the prompt and the full session history
//! - `POST /ask` with a single query, no history

mod client;
mod error;
mod types;

pub use client::{HttpInferenceClient, InferenceApi};
pub use error::InferenceError;
pub use types::{AskRequest, ChatReply, TextToTextRequest};

pub type Result<T> = std::result::Result<T, InferenceError>;
