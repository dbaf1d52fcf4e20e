//! Store Backend Module
//!
//! The persistent key-value capability the accessor is built on.

use crate::error::Result;

// == Store Backend ==
/// A synchronous persistent key-value store.
///
/// Mirrors the browser storage contract: string keys and values, positional
/// key enumeration, and a write path that reports exhaustion as
/// [`StorageError::QuotaExceeded`](crate::error::StorageError::QuotaExceeded)
/// so callers can tell it apart from other failures.
pub trait StoreBackend {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Returns the key at position `index`, or `None` past the end.
    fn key(&self, index: usize) -> Option<String>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every key, in backend order.
    fn keys(&self) -> Vec<String> {
        (0..self.len()).filter_map(|i| self.key(i)).collect()
    }
}
