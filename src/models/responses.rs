//! Response DTOs for the storage API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::storage::{SizeEstimate, StorageStats};

/// Response body for reading a raw string (GET /storage/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for reading JSON (GET /storage/:key/json)
#[derive(Debug, Clone, Serialize)]
pub struct JsonResponse {
    pub key: String,
    /// The parsed document
    pub value: Value,
}

impl JsonResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for writes (PUT /storage/:key and /storage/:key/json)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' stored successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /storage/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for listing keys (GET /storage)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub count: usize,
    pub keys: Vec<String>,
}

impl KeysResponse {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            count: keys.len(),
            keys,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Accessor counters
    #[serde(flatten)]
    pub stats: StorageStats,
    /// Share of reads answered with a default
    pub fallback_rate: f64,
    /// Current number of entries in the store
    pub total_entries: usize,
    /// Estimated store footprint in bytes
    pub size_bytes: u64,
    /// Estimated store footprint in kilobytes
    pub size_kb: u64,
    /// Store budget, null when unlimited
    pub quota_bytes: Option<u64>,
}

impl StatsResponse {
    /// Creates a new StatsResponse from accessor state
    pub fn new(
        stats: StorageStats,
        total_entries: usize,
        size: SizeEstimate,
        quota_bytes: Option<u64>,
    ) -> Self {
        Self {
            fallback_rate: stats.fallback_rate(),
            stats,
            total_entries,
            size_bytes: size.bytes,
            size_kb: size.kilobytes(),
            quota_bytes,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
