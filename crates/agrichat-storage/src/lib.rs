//! AgriChat Storage Layer
//!
//! Durable, string-valued key-value storage for chat state.
//! A write always replaces the whole value stored under a key.

mod database;
mod error;
mod memory;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::KeyValueStore;

pub type Result<T> = std::result::Result<T, StorageError>;
