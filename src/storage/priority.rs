//! Priority Module
//!
//! Decides which keys the recovery policy may evict, and in what order.

use std::collections::HashSet;

use serde::Serialize;

use crate::storage::{DEFAULT_ESSENTIAL_KEYS, DEFAULT_LOW_PRIORITY_KEYS};

// == Priority Class ==
/// Eviction tier of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityClass {
    /// Disposable caches, evicted first
    LowPriority,
    /// Everything unclassified, evicted only on escalation
    Ordinary,
    /// Never evicted
    Essential,
}

// == Priority Config ==
/// Ordered low-priority keys plus the set of essential keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityConfig {
    low_priority: Vec<String>,
    essential: HashSet<String>,
}

impl PriorityConfig {
    /// Builds a config. Duplicate low-priority keys keep their first position.
    pub fn new<L, E>(low_priority: L, essential: E) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let mut seen = HashSet::new();
        let low_priority = low_priority
            .into_iter()
            .map(Into::into)
            .filter(|key: &String| seen.insert(key.clone()))
            .collect();

        Self {
            low_priority,
            essential: essential.into_iter().map(Into::into).collect(),
        }
    }

    /// Tier of `key`. Essential wins if a key is listed in both tiers.
    pub fn classify(&self, key: &str) -> PriorityClass {
        if self.essential.contains(key) {
            PriorityClass::Essential
        } else if self.low_priority.iter().any(|k| k == key) {
            PriorityClass::LowPriority
        } else {
            PriorityClass::Ordinary
        }
    }

    pub fn is_essential(&self, key: &str) -> bool {
        self.essential.contains(key)
    }

    /// Low-priority keys in eviction order.
    pub fn low_priority(&self) -> &[String] {
        &self.low_priority
    }

    pub fn essential(&self) -> &HashSet<String> {
        &self.essential
    }
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_LOW_PRIORITY_KEYS.iter().copied(),
            DEFAULT_ESSENTIAL_KEYS.iter().copied(),
        )
    }
}
