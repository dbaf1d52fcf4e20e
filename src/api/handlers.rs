//! API Handlers
//!
//! HTTP request handlers exposing the storage accessor and maintenance
//! passes.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::{Config, MaintenanceConfig};
use crate::error::{Result, StorageError};
use crate::models::{
    validate_key, DeleteResponse, GetResponse, HealthResponse, JsonResponse, KeysResponse,
    SetResponse, SetStringRequest, StatsResponse,
};
use crate::storage::{MemoryBackend, SafeStorage};
use crate::tasks::{cleanup_storage, migrate_storage, CleanupReport, MigrationReport};

/// Application state shared across all handlers.
///
/// Contains the accessor wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Shared accessor over the in-memory store
    pub storage: Arc<RwLock<SafeStorage<MemoryBackend>>>,
    /// Keys and limits for the maintenance endpoints
    pub maintenance: MaintenanceConfig,
    /// Frontend bundle served for unmatched paths
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Creates a new AppState with default maintenance settings and no
    /// static files.
    pub fn new(storage: SafeStorage<MemoryBackend>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(storage)),
            maintenance: MaintenanceConfig::default(),
            static_dir: None,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds a quota-limited store with the configured priority tiers.
    pub fn from_config(config: &Config) -> Self {
        let mut backend = MemoryBackend::new();
        backend.set_quota(config.quota_bytes);
        let storage = SafeStorage::with_priorities(backend, config.priorities());

        Self {
            storage: Arc::new(RwLock::new(storage)),
            maintenance: config.maintenance(),
            static_dir: Some(config.static_dir.clone()),
        }
    }
}

fn checked_key(key: String) -> Result<String> {
    match validate_key(&key) {
        Some(error_msg) => Err(StorageError::InvalidRequest(error_msg)),
        None => Ok(key),
    }
}

/// Handler for GET /storage
pub async fn list_keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let storage = state.storage.read().await;
    Json(KeysResponse::new(storage.keys()))
}

/// Handler for GET /storage/:key
///
/// Returns the raw stored string.
pub async fn get_string_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let key = checked_key(key)?;

    // Write lock: reads update the accessor's counters
    let mut storage = state.storage.write().await;
    match storage.get_string(&key, None) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(StorageError::NotFound(key)),
    }
}

/// Handler for PUT /storage/:key
///
/// Stores the request's value verbatim.
pub async fn set_string_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetStringRequest>,
) -> Result<Json<SetResponse>> {
    let key = checked_key(key)?;

    let mut storage = state.storage.write().await;
    if storage.set_string(&key, &req.value) {
        Ok(Json(SetResponse::new(key)))
    } else {
        Err(StorageError::WriteRejected(key))
    }
}

/// Handler for GET /storage/:key/json
///
/// Returns the stored value parsed as JSON. Absent keys and values that
/// are not JSON both answer 404.
pub async fn get_json_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<JsonResponse>> {
    let key = checked_key(key)?;

    // A stored `null` reads back as `null`, not as an absent key
    let mut storage = state.storage.write().await;
    let raw = storage
        .get_string(&key, None)
        .ok_or_else(|| StorageError::NotFound(key.clone()))?;

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Ok(Json(JsonResponse::new(key, value))),
        Err(err) => {
            debug!("Value under {} is not JSON: {}", key, err);
            Err(StorageError::NotFound(key))
        }
    }
}

/// Handler for PUT /storage/:key/json
///
/// Stores the request body, which may be any JSON document.
pub async fn set_json_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<SetResponse>> {
    let key = checked_key(key)?;

    let mut storage = state.storage.write().await;
    if storage.set_json(&key, &value) {
        Ok(Json(SetResponse::new(key)))
    } else {
        Err(StorageError::WriteRejected(key))
    }
}

/// Handler for DELETE /storage/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let key = checked_key(key)?;

    let mut storage = state.storage.write().await;
    if !storage.contains(&key) {
        return Err(StorageError::NotFound(key));
    }
    if storage.remove(&key) {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(StorageError::RemoveFailed(key))
    }
}

/// Handler for POST /maintenance/migrate
pub async fn migrate_handler(State(state): State<AppState>) -> Json<MigrationReport> {
    let mut storage = state.storage.write().await;
    Json(migrate_storage(&mut *storage, &state.maintenance.optimize_keys))
}

/// Handler for POST /maintenance/cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<CleanupReport> {
    let mut storage = state.storage.write().await;
    Json(cleanup_storage(
        &mut *storage,
        &state.maintenance.cleanup_keys,
        state.maintenance.cleanup_limit,
    ))
}

/// Handler for GET /stats
///
/// Returns accessor counters and the store's estimated size.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let storage = state.storage.read().await;

    Json(StatsResponse::new(
        storage.stats(),
        storage.len(),
        storage.size_estimate(),
        storage.backend().quota_bytes(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
