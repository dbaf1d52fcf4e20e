//! LMS Storage - quota-aware client storage for the LMS frontend
//!
//! Provides safe read/write access to a persistent key-value store with
//! priority eviction when the store is full, plus startup migration and
//! cleanup passes and a small HTTP server for the frontend bundle.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::{Config, MaintenanceConfig};
pub use error::StorageError;
pub use storage::{MemoryBackend, PriorityConfig, SafeStorage, StoreBackend};
pub use tasks::{cleanup_storage, migrate_storage, run_startup_maintenance, spawn_cleanup_task};
