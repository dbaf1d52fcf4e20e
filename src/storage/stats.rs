//! Storage Statistics Module
//!
//! Counts reads, writes, quota failures and recoveries.

use serde::Serialize;

// == Storage Stats ==
/// Accessor activity counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Number of read calls
    pub reads: u64,
    /// Reads answered with the caller's default (absent, unreadable or unparsable)
    pub read_fallbacks: u64,
    /// Number of write calls
    pub writes: u64,
    /// Writes reported as failed to the caller
    pub failed_writes: u64,
    /// Writes rejected by the backend for lack of space
    pub quota_errors: u64,
    /// Quota failures that a recovery pass turned into success
    pub recoveries: u64,
    /// Keys removed by recovery passes
    pub evictions: u64,
}

impl StorageStats {
    // == Constructor ==
    /// Creates a new StorageStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Fallback Rate ==
    /// Share of reads answered with a default.
    ///
    /// Returns 0.0 if nothing has been read yet.
    pub fn fallback_rate(&self) -> f64 {
        if self.reads == 0 {
            0.0
        } else {
            self.read_fallbacks as f64 / self.reads as f64
        }
    }

    pub fn record_read(&mut self) {
        self.reads += 1;
    }

    pub fn record_fallback(&mut self) {
        self.read_fallbacks += 1;
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_failed_write(&mut self) {
        self.failed_writes += 1;
    }

    pub fn record_quota_error(&mut self) {
        self.quota_errors += 1;
    }

    pub fn record_recovery(&mut self) {
        self.recoveries += 1;
    }

    /// Adds `count` evicted keys.
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }
}
