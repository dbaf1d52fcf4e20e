//! Storage Module
//!
//! Quota-aware access to a persistent key-value store, with priority-based
//! recovery when the store runs out of space.

mod accessor;
mod backend;
mod key_order;
mod memory;
mod priority;
mod recovery;
mod size;
mod stats;

#[cfg(test)]
pub(crate) mod testing;

// Re-export public types
pub use accessor::SafeStorage;
pub use backend::StoreBackend;
pub use key_order::KeyOrder;
pub use memory::MemoryBackend;
pub use priority::{PriorityClass, PriorityConfig};
pub use recovery::{recover, RecoveryOutcome};
pub use size::{utf16_len, SizeEstimate};
pub use stats::StorageStats;

// == Default Key Lists ==
/// Keys that recovery must never evict.
pub const DEFAULT_ESSENTIAL_KEYS: &[&str] = &["authToken", "userRole"];

/// Disposable caches, in the order recovery evicts them.
pub const DEFAULT_LOW_PRIORITY_KEYS: &[&str] = &[
    "forumPosts",
    "instructorForumPosts",
    "studentForumPosts",
    "studentApplicants",
    "checkedStudents",
    "institutions",
    "instructorCourses",
];

/// Large entries the migration pass re-encodes at startup.
pub const DEFAULT_OPTIMIZE_KEYS: &[&str] = &[
    "forumPosts",
    "instructorForumPosts",
    "studentApplicants",
    "checkedStudents",
    "institutions",
    "instructorCourses",
];

/// List-valued caches the cleanup pass trims.
pub const DEFAULT_CLEANUP_KEYS: &[&str] = &["forumPosts", "instructorForumPosts"];

/// Number of most recent items the cleanup pass keeps.
pub const DEFAULT_CLEANUP_LIMIT: usize = 20;
