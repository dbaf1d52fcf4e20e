//! Memory Backend Module
//!
//! HashMap-backed store with an optional byte quota.

use std::collections::HashMap;

use crate::error::{Result, StorageError};
use crate::storage::{KeyOrder, SizeEstimate, StoreBackend};

// == Memory Backend ==
/// In-memory [`StoreBackend`] that enforces a quota the way browser storage
/// does: a write that would push the [`SizeEstimate`] of the whole store past
/// the quota fails with `QuotaExceeded` and leaves the store unchanged.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    /// Key-value storage
    entries: HashMap<String, String>,
    /// Enumeration order
    order: KeyOrder,
    /// Byte budget, None = unlimited
    quota_bytes: Option<u64>,
    /// Running size of all entries
    used_bytes: u64,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an unlimited store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store limited to `quota_bytes`.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    // == Quota ==
    /// Changes the byte budget. Existing entries are kept even if they no
    /// longer fit; only later writes are checked.
    pub fn set_quota(&mut self, quota_bytes: Option<u64>) {
        self.quota_bytes = quota_bytes;
    }

    /// Current byte budget.
    pub fn quota_bytes(&self) -> Option<u64> {
        self.quota_bytes
    }

    /// Bytes currently used, per [`SizeEstimate`].
    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order = KeyOrder::new();
        self.used_bytes = 0;
    }
}

impl StoreBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let old_size = self
            .entries
            .get(key)
            .map(|old| SizeEstimate::entry(key, old).bytes)
            .unwrap_or(0);
        let new_size = SizeEstimate::entry(key, value).bytes;
        let projected = self.used_bytes - old_size + new_size;

        if let Some(quota) = self.quota_bytes {
            if projected > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }

        if self
            .entries
            .insert(key.to_string(), value.to_string())
            .is_none()
        {
            self.order.push(key);
        }
        self.used_bytes = projected;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if let Some(old) = self.entries.remove(key) {
            self.used_bytes -= SizeEstimate::entry(key, &old).bytes;
            self.order.remove(key);
        }
        Ok(())
    }

    fn key(&self, index: usize) -> Option<String> {
        self.order.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_new() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());
        assert_eq!(backend.used_bytes(), 0);
        assert_eq!(backend.quota_bytes(), None);
    }

    #[test]
    fn test_backend_set_and_get() {
        let mut backend = MemoryBackend::new();

        backend.set("key1", "value1").unwrap();

        assert_eq!(backend.get("key1").unwrap(), Some("value1".to_string()));
        assert_eq!(backend.get("missing").unwrap(), None);
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_backend_overwrite_keeps_position() {
        let mut backend = MemoryBackend::new();

        backend.set("a", "1").unwrap();
        backend.set("b", "2").unwrap();
        backend.set("a", "3").unwrap();

        assert_eq!(backend.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(backend.get("a").unwrap(), Some("3".to_string()));
    }

    #[test]
    fn test_backend_repeated_overwrites_track_key_once() {
        let mut backend = MemoryBackend::new();

        for i in 0..50 {
            backend.set("draft", &i.to_string()).unwrap();
        }
        backend.set("other", "x").unwrap();

        assert_eq!(backend.len(), 2);
        assert_eq!(backend.key(0), Some("draft".to_string()));
        assert_eq!(backend.key(1), Some("other".to_string()));
        assert_eq!(backend.key(2), None);
    }

    #[test]
    fn test_backend_tracks_used_bytes() {
        let mut backend = MemoryBackend::new();

        backend.set("ab", "cd").unwrap();
        assert_eq!(backend.used_bytes(), 8);

        backend.set("ab", "c").unwrap();
        assert_eq!(backend.used_bytes(), 6);

        backend.remove("ab").unwrap();
        assert_eq!(backend.used_bytes(), 0);
    }

    #[test]
    fn test_backend_quota_rejects_write() {
        // "k" + "1234" = 10 bytes
        let mut backend = MemoryBackend::with_quota(10);

        backend.set("k", "1234").unwrap();
        let result = backend.set("j", "x");

        assert!(matches!(result, Err(StorageError::QuotaExceeded { ref key }) if key == "j"));
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.used_bytes(), 10);
    }

    #[test]
    fn test_backend_quota_allows_shrinking_overwrite() {
        let mut backend = MemoryBackend::with_quota(10);

        backend.set("k", "1234").unwrap();
        backend.set("k", "12").unwrap();

        assert_eq!(backend.used_bytes(), 6);
    }

    #[test]
    fn test_backend_remove_absent_is_ok() {
        let mut backend = MemoryBackend::new();
        assert!(backend.remove("missing").is_ok());
    }

    #[test]
    fn test_backend_key_index() {
        let mut backend = MemoryBackend::new();

        backend.set("first", "1").unwrap();
        backend.set("second", "2").unwrap();

        assert_eq!(backend.key(0), Some("first".to_string()));
        assert_eq!(backend.key(1), Some("second".to_string()));
        assert_eq!(backend.key(2), None);
    }

    #[test]
    fn test_backend_clear() {
        let mut backend = MemoryBackend::with_quota(100);

        backend.set("a", "1").unwrap();
        backend.clear();

        assert!(backend.is_empty());
        assert_eq!(backend.used_bytes(), 0);
        assert_eq!(backend.quota_bytes(), Some(100));
    }
}
