//! Key-value storage port

use crate::Result;

/// Synchronous string-valued storage.
///
/// Implementations must make a single `write` atomic: a reader sees either
/// the previous value or the new one, never a mix.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}
