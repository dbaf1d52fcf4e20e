//! Maintenance Tasks Module
//!
//! One-shot passes that keep the store small.
//!
//! # Tasks
//! - Migration: re-encodes known large entries in canonical JSON
//! - Cleanup: trims list-valued caches to their most recent items, at
//!   startup and optionally on an interval

mod cleanup;
mod migration;

pub use cleanup::{cleanup_storage, spawn_cleanup_task, CleanupReport, TrimmedKey};
pub use migration::{migrate_storage, MigrationReport};

use crate::config::MaintenanceConfig;
use crate::storage::{SafeStorage, StoreBackend};

/// Runs the migration pass followed by the cleanup pass, as done once at
/// application start.
pub fn run_startup_maintenance<B: StoreBackend>(
    storage: &mut SafeStorage<B>,
    config: &MaintenanceConfig,
) -> (MigrationReport, CleanupReport) {
    let migration = migrate_storage(storage, &config.optimize_keys);
    let cleanup = cleanup_storage(storage, &config.cleanup_keys, config.cleanup_limit);
    (migration, cleanup)
}
