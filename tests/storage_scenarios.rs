//! End-to-end storage scenarios through the public API.

use lms_storage::error::Result;
use lms_storage::{
    cleanup_storage, MemoryBackend, PriorityConfig, SafeStorage, StorageError, StoreBackend,
};
use serde_json::{json, Value};

fn forum_keys() -> Vec<String> {
    vec!["forumPosts".to_string(), "instructorForumPosts".to_string()]
}

/// Backend that cannot be read or written at all.
struct BrokenBackend;

impl StoreBackend for BrokenBackend {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(StorageError::ReadFailed("storage disabled".into()))
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        Err(StorageError::QuotaExceeded {
            key: key.to_string(),
        })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        Err(StorageError::RemoveFailed(key.to_string()))
    }

    fn key(&self, _index: usize) -> Option<String> {
        None
    }

    fn len(&self) -> usize {
        0
    }
}

#[test]
fn scenario_a_cleanup_keeps_last_twenty() {
    let mut storage = SafeStorage::new(MemoryBackend::new());
    let posts: Vec<u32> = (1..=25).collect();

    assert!(storage.set_json("forumPosts", &posts));
    cleanup_storage(&mut storage, &forum_keys(), 20);

    let expected: Vec<u32> = (6..=25).collect();
    assert_eq!(storage.get_json("forumPosts", Vec::<u32>::new()), expected);
}

#[test]
fn scenario_b_quota_evicts_forum_posts_only() {
    let mut backend = MemoryBackend::new();
    backend.set("authToken", "t").unwrap();
    backend.set("userRole", "admin").unwrap();
    let huge: Vec<String> = (0..500).map(|i| format!("post number {}", i)).collect();
    backend
        .set("forumPosts", &serde_json::to_string(&huge).unwrap())
        .unwrap();
    let used = backend.used_bytes();
    backend.set_quota(Some(used));
    let mut storage = SafeStorage::new(backend);

    assert!(storage.set_json("newKey", &json!({"a": 1})));

    assert!(!storage.contains("forumPosts"));
    assert_eq!(storage.get_json("newKey", Value::Null), json!({"a": 1}));
    assert_eq!(storage.get_string_or("authToken", ""), "t");
    assert_eq!(storage.get_string_or("userRole", ""), "admin");
}

#[test]
fn scenario_c_missing_string_returns_fallback() {
    let mut storage = SafeStorage::new(MemoryBackend::new());
    assert_eq!(storage.get_string_or("missing", "fallback"), "fallback");
}

#[test]
fn cleanup_fifty_items_then_noop() {
    let mut storage = SafeStorage::new(MemoryBackend::new());
    let posts: Vec<u32> = (0..50).collect();
    storage.set_json("instructorForumPosts", &posts);

    let first = cleanup_storage(&mut storage, &forum_keys(), 20);
    let second = cleanup_storage(&mut storage, &forum_keys(), 20);

    let expected: Vec<u32> = (30..50).collect();
    assert_eq!(first.trimmed.len(), 1);
    assert!(second.trimmed.is_empty());
    assert_eq!(storage.get_json("instructorForumPosts", Vec::<u32>::new()), expected);
}

#[test]
fn broken_backend_never_panics() {
    let mut storage = SafeStorage::new(BrokenBackend);

    assert_eq!(storage.get_string_or("authToken", "none"), "none");
    assert_eq!(storage.get_json("forumPosts", json!([])), json!([]));
    assert!(!storage.set_string("authToken", "t"));
    assert!(!storage.set_json("forumPosts", &json!([1, 2, 3])));
    assert!(!storage.remove("forumPosts"));

    let report = cleanup_storage(&mut storage, &forum_keys(), 20);
    assert_eq!(report.failed, forum_keys());
}

#[test]
fn custom_priorities_drive_eviction() {
    let mut backend = MemoryBackend::new();
    backend.set("draftQuiz", &"q".repeat(200)).unwrap();
    backend.set("forumPosts", &"f".repeat(200)).unwrap();
    let used = backend.used_bytes();
    backend.set_quota(Some(used));
    let priorities = PriorityConfig::new(["draftQuiz"], ["forumPosts"]);
    let mut storage = SafeStorage::with_priorities(backend, priorities);

    assert!(storage.set_string("grades", "A,B,C"));

    assert!(!storage.contains("draftQuiz"));
    assert!(storage.contains("forumPosts"));
}
