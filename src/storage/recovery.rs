//! Quota Recovery Module
//!
//! Frees space after a quota-exceeded write and retries it.
//!
//! Eviction is by fixed priority rather than size or recency: low-priority
//! caches go first, one at a time with a retry after each, then everything
//! that is neither essential nor the key being written.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::storage::{PriorityConfig, StoreBackend};

// == Recovery Outcome ==
/// Result of a recovery pass, with every key it removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum RecoveryOutcome {
    /// The retry succeeded after removing low-priority keys
    Evicted { evicted: Vec<String> },
    /// The retry succeeded after clearing all non-essential keys
    Escalated { evicted: Vec<String> },
    /// Nothing freed enough space
    Failed { evicted: Vec<String> },
}

impl RecoveryOutcome {
    /// Returns true if the write ended up stored.
    pub fn succeeded(&self) -> bool {
        !matches!(self, RecoveryOutcome::Failed { .. })
    }

    /// Keys removed during the pass, in removal order.
    pub fn evicted(&self) -> &[String] {
        match self {
            RecoveryOutcome::Evicted { evicted }
            | RecoveryOutcome::Escalated { evicted }
            | RecoveryOutcome::Failed { evicted } => evicted,
        }
    }
}

// == Recover ==
/// Evicts by priority until `key` = `value` can be written.
///
/// Never removes an essential key or `key` itself, and never fails loudly:
/// removal errors are logged and the candidate is skipped.
///
/// Low-priority keys that are not present are passed over without a retry,
/// since removing them cannot free space.
pub fn recover<B>(
    backend: &mut B,
    priorities: &PriorityConfig,
    key: &str,
    value: &str,
) -> RecoveryOutcome
where
    B: StoreBackend + ?Sized,
{
    let mut evicted = Vec::new();

    for candidate in priorities.low_priority() {
        if candidate == key || priorities.is_essential(candidate) {
            continue;
        }
        // Absent keys free nothing, so they do not earn a retry
        if let Ok(None) = backend.get(candidate) {
            continue;
        }

        if let Err(err) = backend.remove(candidate) {
            warn!("Failed to remove {} while recovering space: {}", candidate, err);
            continue;
        }
        debug!("Removed {} to free up space", candidate);
        evicted.push(candidate.clone());

        match backend.set(key, value) {
            Ok(()) => {
                info!("Stored {} after evicting {} low-priority keys", key, evicted.len());
                return RecoveryOutcome::Evicted { evicted };
            }
            Err(err) => debug!("Retry of {} still failing: {}", key, err),
        }
    }

    if priorities.is_essential(key) {
        warn!("Unable to store essential key {} without evicting essential data", key);
        return RecoveryOutcome::Failed { evicted };
    }

    // Escalate: clear everything that is neither essential nor the target
    for existing in backend.keys() {
        if existing == key || priorities.is_essential(&existing) {
            continue;
        }
        match backend.remove(&existing) {
            Ok(()) => evicted.push(existing),
            Err(err) => warn!("Failed to remove {} during escalation: {}", existing, err),
        }
    }

    match backend.set(key, value) {
        Ok(()) => {
            info!("Stored {} after clearing all non-essential data", key);
            RecoveryOutcome::Escalated { evicted }
        }
        Err(err) => {
            error!("Still unable to store {} after clearing space: {}", key, err);
            RecoveryOutcome::Failed { evicted }
        }
    }
}
