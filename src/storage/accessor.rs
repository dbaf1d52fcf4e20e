//! Safe Storage Module
//!
//! Total read/write access to a [`StoreBackend`]. Nothing here returns an
//! error or panics: reads fall back to the caller's default and writes
//! report a plain `bool`, invoking quota recovery when the store is full.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, warn};

use crate::error::Result;
use crate::storage::{
    recover, PriorityConfig, RecoveryOutcome, SizeEstimate, StorageStats, StoreBackend,
};

// == Safe Storage ==
/// Quota-aware accessor over a persistent key-value store.
#[derive(Debug)]
pub struct SafeStorage<B: StoreBackend> {
    /// Underlying store
    backend: B,
    /// Eviction tiers used on quota failure
    priorities: PriorityConfig,
    /// Activity counters
    stats: StorageStats,
}

impl<B: StoreBackend> SafeStorage<B> {
    // == Constructor ==
    /// Wraps `backend` with the default LMS priority tiers.
    pub fn new(backend: B) -> Self {
        Self::with_priorities(backend, PriorityConfig::default())
    }

    /// Wraps `backend` with custom priority tiers.
    pub fn with_priorities(backend: B, priorities: PriorityConfig) -> Self {
        Self {
            backend,
            priorities,
            stats: StorageStats::new(),
        }
    }

    // == Get String ==
    /// Returns the stored string for `key`, or `default` if it is absent or
    /// the store cannot be read.
    pub fn get_string(&mut self, key: &str, default: Option<String>) -> Option<String> {
        self.stats.record_read();
        match self.backend.get(key) {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                self.stats.record_fallback();
                default
            }
            Err(err) => {
                warn!("Error getting {} from storage: {}", key, err);
                self.stats.record_fallback();
                default
            }
        }
    }

    /// Like [`get_string`](Self::get_string) with a required default.
    pub fn get_string_or(&mut self, key: &str, default: &str) -> String {
        self.get_string(key, None).unwrap_or_else(|| default.to_string())
    }

    // == Get JSON ==
    /// Returns the stored value for `key` parsed as JSON, or `default` if it
    /// is absent, unreadable or not valid JSON for `T`.
    pub fn get_json<T: DeserializeOwned>(&mut self, key: &str, default: T) -> T {
        self.stats.record_read();
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.stats.record_fallback();
                return default;
            }
            Err(err) => {
                warn!("Error getting {} from storage: {}", key, err);
                self.stats.record_fallback();
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("Error parsing JSON stored under {}: {}", key, err);
                self.stats.record_fallback();
                default
            }
        }
    }

    // == Set String ==
    /// Stores `value` verbatim. On quota exhaustion runs one recovery pass
    /// and reports whether the value ended up stored.
    pub fn set_string(&mut self, key: &str, value: &str) -> bool {
        self.stats.record_write();
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(err) if err.is_quota_exceeded() => {
                warn!("Storage quota exceeded while setting {}, recovering space", key);
                self.stats.record_quota_error();
                let outcome = recover(&mut self.backend, &self.priorities, key, value);
                self.finish_recovery(&outcome)
            }
            Err(err) => {
                error!("Error setting {} in storage: {}", key, err);
                self.stats.record_failed_write();
                false
            }
        }
    }

    // == Set JSON ==
    /// Serializes `value` to JSON and stores it as [`set_string`](Self::set_string)
    /// does. Serialization failures report `false` without touching the store.
    pub fn set_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(serialized) => self.set_string(key, &serialized),
            Err(err) => {
                error!("Error serializing JSON for {}: {}", key, err);
                self.stats.record_write();
                self.stats.record_failed_write();
                false
            }
        }
    }

    // == Remove ==
    /// Removes `key`. Returns false if the store refused.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(err) => {
                warn!("Error removing {} from storage: {}", key, err);
                false
            }
        }
    }

    /// Reads the raw stored string, surfacing backend errors.
    ///
    /// Maintenance passes use this to tell "absent" from "unreadable".
    pub fn read_raw(&self, key: &str) -> Result<Option<String>> {
        self.backend.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(self.backend.get(key), Ok(Some(_)))
    }

    pub fn keys(&self) -> Vec<String> {
        self.backend.keys()
    }

    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Approximate footprint of the whole store.
    pub fn size_estimate(&self) -> SizeEstimate {
        SizeEstimate::measure(&self.backend)
    }

    pub fn stats(&self) -> StorageStats {
        self.stats.clone()
    }

    pub fn priorities(&self) -> &PriorityConfig {
        &self.priorities
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    fn finish_recovery(&mut self, outcome: &RecoveryOutcome) -> bool {
        self.stats.record_evictions(outcome.evicted().len());
        if outcome.succeeded() {
            self.stats.record_recovery();
            true
        } else {
            self.stats.record_failed_write();
            false
        }
    }
}
