//! Key Order Module
//!
//! Tracks the positional order of keys for `key(index)` enumeration.

use std::collections::VecDeque;

// == Key Order ==
/// Insertion order of stored keys.
///
/// Keys are stored in a VecDeque where:
/// - Front = First inserted
/// - Back = Most recently inserted
///
/// Overwriting an existing key keeps its position, the way browser storage
/// enumerates keys.
#[derive(Debug, Default, Clone)]
pub struct KeyOrder {
    order: VecDeque<String>,
}

impl KeyOrder {
    // == Constructor ==
    /// Creates a new empty key order.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push ==
    /// Appends a key that is not tracked yet.
    ///
    /// The owning store knows whether a key is new, so no scan happens here.
    pub fn push(&mut self, key: &str) {
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the order.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Get ==
    /// Returns the key at `index`.
    pub fn get(&self, index: usize) -> Option<&String> {
        self.order.get(index)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
