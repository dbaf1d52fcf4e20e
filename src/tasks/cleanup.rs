//! Storage Cleanup Pass
//!
//! Trims list-valued caches to their most recent items, either once or
//! periodically in the background.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::storage::{SafeStorage, StoreBackend};

// == Cleanup Report ==
/// One list the cleanup pass shortened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrimmedKey {
    pub key: String,
    /// Items before trimming
    pub before: usize,
    /// Items after trimming
    pub after: usize,
}

/// What a cleanup pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Lists that were shortened
    pub trimmed: Vec<TrimmedKey>,
    /// Keys that could not be read, parsed or written back
    pub failed: Vec<String>,
}

/// Keeps the last `limit` elements of every JSON array stored under `keys`.
///
/// Array order is treated as recency, newest last. Non-arrays and arrays
/// already within the limit are left alone. A failure on one key is logged
/// and the pass moves on to the next.
pub fn cleanup_storage<B: StoreBackend>(
    storage: &mut SafeStorage<B>,
    keys: &[String],
    limit: usize,
) -> CleanupReport {
    let mut report = CleanupReport::default();

    for key in keys {
        let raw = match storage.read_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => continue,
            Err(err) => {
                warn!("Error cleaning key {}: {}", key, err);
                report.failed.push(key.clone());
                continue;
            }
        };

        let mut items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) if items.len() > limit => items,
            Ok(_) => continue,
            Err(err) => {
                warn!("Error cleaning key {}: {}", key, err);
                report.failed.push(key.clone());
                continue;
            }
        };

        let before = items.len();
        let recent = items.split_off(before - limit);

        if !storage.remove(key) {
            debug!("Rewriting {} in place, old value could not be removed", key);
        }
        if storage.set_json(key, &recent) {
            info!("Cleaned up {}: reduced from {} to {} items", key, before, recent.len());
            report.trimmed.push(TrimmedKey {
                key: key.clone(),
                before,
                after: recent.len(),
            });
        } else {
            warn!("Could not write back trimmed key {}", key);
            report.failed.push(key.clone());
        }
    }

    report
}

/// Spawns a background task that periodically runs the cleanup pass.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs. It takes the write lock for the duration of each pass.
///
/// # Arguments
/// * `storage` - Shared accessor
/// * `keys` - List-valued keys to trim
/// * `limit` - Items kept per list
/// * `interval_secs` - Seconds between runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task<B>(
    storage: Arc<RwLock<SafeStorage<B>>>,
    keys: Vec<String>,
    limit: usize,
    interval_secs: u64,
) -> JoinHandle<()>
where
    B: StoreBackend + Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting storage cleanup task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let report = {
                let mut guard = storage.write().await;
                cleanup_storage(&mut *guard, &keys, limit)
            };

            if report.trimmed.is_empty() {
                debug!("Storage cleanup: nothing to trim");
            } else {
                info!("Storage cleanup: trimmed {} lists", report.trimmed.len());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FaultyBackend;
    use crate::storage::MemoryBackend;
    use serde_json::json;

    fn forum_keys() -> Vec<String> {
        vec!["forumPosts".to_string(), "instructorForumPosts".to_string()]
    }

    #[test]
    fn test_cleanup_keeps_last_items_in_order() {
        let mut storage = SafeStorage::new(MemoryBackend::new());
        let posts: Vec<u32> = (1..=50).collect();
        storage.set_json("forumPosts", &posts);

        let report = cleanup_storage(&mut storage, &forum_keys(), 20);

        let expected: Vec<u32> = (31..=50).collect();
        assert_eq!(storage.get_json("forumPosts", Vec::<u32>::new()), expected);
        assert_eq!(
            report.trimmed,
            vec![TrimmedKey {
                key: "forumPosts".into(),
                before: 50,
                after: 20
            }]
        );
    }

    #[test]
    fn test_cleanup_second_run_is_noop() {
        let mut storage = SafeStorage::new(MemoryBackend::new());
        let posts: Vec<u32> = (1..=50).collect();
        storage.set_json("forumPosts", &posts);

        cleanup_storage(&mut storage, &forum_keys(), 20);
        let first = storage.get_string_or("forumPosts", "");
        let report = cleanup_storage(&mut storage, &forum_keys(), 20);

        assert!(report.trimmed.is_empty());
        assert_eq!(storage.get_string_or("forumPosts", ""), first);
    }

    #[test]
    fn test_cleanup_ignores_short_lists_and_objects() {
        let mut storage = SafeStorage::new(MemoryBackend::new());
        storage.set_json("forumPosts", &json!([1, 2, 3]));
        storage.set_json("instructorForumPosts", &json!({"posts": (0..30).collect::<Vec<_>>()}));

        let report = cleanup_storage(&mut storage, &forum_keys(), 20);

        assert_eq!(report, CleanupReport::default());
    }

    #[test]
    fn test_cleanup_continues_after_bad_key() {
        let mut storage = SafeStorage::new(MemoryBackend::new());
        storage.set_string("forumPosts", "[1, 2,");
        storage.set_json("instructorForumPosts", &(0..25).collect::<Vec<u32>>());

        let report = cleanup_storage(&mut storage, &forum_keys(), 20);

        assert_eq!(report.failed, vec!["forumPosts"]);
        assert_eq!(report.trimmed.len(), 1);
        assert_eq!(storage.get_string_or("forumPosts", ""), "[1, 2,");
    }

    #[test]
    fn test_cleanup_overwrites_key_that_cannot_be_removed() {
        let posts = serde_json::to_string(&(0..30).collect::<Vec<u32>>()).unwrap();
        let mut backend = FaultyBackend::seeded(&[("forumPosts", posts.as_str())]);
        backend.stuck_keys = vec!["forumPosts".to_string()];
        let mut storage = SafeStorage::new(backend);

        let report = cleanup_storage(&mut storage, &forum_keys(), 20);

        let expected: Vec<u32> = (10..30).collect();
        assert_eq!(report.trimmed.len(), 1);
        assert!(report.failed.is_empty());
        assert_eq!(storage.get_json("forumPosts", Vec::<u32>::new()), expected);
    }

    #[tokio::test]
    async fn test_cleanup_task_trims_in_background() {
        let storage = Arc::new(RwLock::new(SafeStorage::new(MemoryBackend::new())));
        {
            let mut guard = storage.write().await;
            guard.set_json("forumPosts", &(0..30).collect::<Vec<u32>>());
        }

        let handle = spawn_cleanup_task(storage.clone(), forum_keys(), 20, 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut guard = storage.write().await;
            let posts: Vec<u32> = guard.get_json("forumPosts", Vec::new());
            assert_eq!(posts.len(), 20);
            assert_eq!(posts[0], 10);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let storage = Arc::new(RwLock::new(SafeStorage::new(MemoryBackend::new())));

        let handle = spawn_cleanup_task(storage, forum_keys(), 20, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
