//! Storage Migration Pass
//!
//! Re-encodes known large entries through the accessor at startup.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::storage::{SafeStorage, SizeEstimate, StoreBackend};

// == Migration Report ==
/// What a migration pass did.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    /// Keys re-encoded successfully
    pub migrated: Vec<String>,
    /// Keys left untouched because they were unreadable or not JSON
    pub skipped: Vec<String>,
    /// Keys whose rewrite was rejected by the store
    pub failed: Vec<String>,
    /// Store size before the pass
    pub before: SizeEstimate,
    /// Store size after the pass
    pub after: SizeEstimate,
    pub completed_at: DateTime<Utc>,
}

impl MigrationReport {
    /// Bytes reclaimed by the pass.
    pub fn saved_bytes(&self) -> u64 {
        self.before.saved(self.after)
    }
}

/// Parses each key in `keys` as JSON, removes it and writes it back through
/// [`SafeStorage::set_json`], which stores it in canonical form.
///
/// Absent keys are skipped silently. Values that cannot be read or parsed
/// are logged and kept as they are. Running the pass twice leaves the same
/// bytes in the store.
pub fn migrate_storage<B: StoreBackend>(
    storage: &mut SafeStorage<B>,
    keys: &[String],
) -> MigrationReport {
    info!("Starting storage migration over {} keys", storage.len());
    let before = storage.size_estimate();

    let mut migrated = Vec::new();
    let mut skipped = Vec::new();
    let mut failed = Vec::new();

    for key in keys {
        let raw = match storage.read_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => continue,
            Err(err) => {
                warn!("Error migrating key {}: {}", key, err);
                skipped.push(key.clone());
                continue;
            }
        };

        let data: Value = match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(err) => {
                warn!("Error migrating key {}: {}", key, err);
                skipped.push(key.clone());
                continue;
            }
        };

        if !storage.remove(key) {
            debug!("Rewriting {} in place, old value could not be removed", key);
        }
        if storage.set_json(key, &data) {
            info!("Migrated and optimized: {}", key);
            migrated.push(key.clone());
        } else {
            warn!("Could not write back migrated key {}", key);
            failed.push(key.clone());
        }
    }

    let after = storage.size_estimate();
    info!(
        "Storage optimization complete. Before: {}KB, After: {}KB, Saved: {}KB",
        before.kilobytes(),
        after.kilobytes(),
        before.kilobytes().saturating_sub(after.kilobytes())
    );

    MigrationReport {
        migrated,
        skipped,
        failed,
        before,
        after,
        completed_at: Utc::now(),
    }
}
