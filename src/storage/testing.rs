//! Fault-injecting backend for unit tests.

use crate::error::{Result, StorageError};
use crate::storage::{MemoryBackend, StoreBackend};

/// How [`FaultyBackend`] fails writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFault {
    None,
    /// Every write reports quota exhaustion
    Quota,
    /// Every write fails with a non-quota error
    Io,
}

/// Wraps a [`MemoryBackend`] and fails selected operations on demand.
#[derive(Debug, Default)]
pub struct FaultyBackend {
    pub inner: MemoryBackend,
    pub fail_reads: bool,
    pub write_fault: Option<WriteFault>,
    /// Keys whose removal fails
    pub stuck_keys: Vec<String>,
}

impl FaultyBackend {
    pub fn seeded(entries: &[(&str, &str)]) -> Self {
        let mut inner = MemoryBackend::new();
        for (key, value) in entries {
            inner.set(key, value).unwrap();
        }
        Self {
            inner,
            ..Self::default()
        }
    }
}

impl StoreBackend for FaultyBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(StorageError::ReadFailed("storage unavailable".into()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self.write_fault {
            Some(WriteFault::Quota) => Err(StorageError::QuotaExceeded {
                key: key.to_string(),
            }),
            Some(WriteFault::Io) => Err(StorageError::WriteFailed("disk unplugged".into())),
            Some(WriteFault::None) | None => self.inner.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.stuck_keys.iter().any(|k| k == key) {
            return Err(StorageError::RemoveFailed(key.to_string()));
        }
        self.inner.remove(key)
    }

    fn key(&self, index: usize) -> Option<String> {
        self.inner.key(index)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
