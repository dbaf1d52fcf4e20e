//! Size Estimate Module
//!
//! Approximates how many bytes a store occupies.

use serde::Serialize;

use crate::storage::StoreBackend;

// == Size Estimate ==
/// Approximate byte footprint of a store.
///
/// Each entry counts as `2 * (key + value)` UTF-16 code units, which is how
/// browsers account string storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SizeEstimate {
    /// Estimated bytes
    pub bytes: u64,
}

impl SizeEstimate {
    // == Constructor ==
    /// Wraps a raw byte count.
    pub fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    // == Entry Size ==
    /// Estimated footprint of a single entry.
    pub fn entry(key: &str, value: &str) -> Self {
        Self::from_bytes(2 * (utf16_len(key) + utf16_len(value)))
    }

    // == Measure ==
    /// Sums the footprint of every entry in `backend`.
    ///
    /// Entries that cannot be read are left out of the total.
    pub fn measure<B: StoreBackend + ?Sized>(backend: &B) -> Self {
        let bytes = backend
            .keys()
            .iter()
            .filter_map(|key| match backend.get(key) {
                Ok(Some(value)) => Some(Self::entry(key, &value).bytes),
                _ => None,
            })
            .sum();
        Self::from_bytes(bytes)
    }

    /// Size in kilobytes, rounded to the nearest whole kilobyte.
    pub fn kilobytes(&self) -> u64 {
        (self.bytes + 512) / 1024
    }

    /// Bytes saved going from `self` to `after`, zero if it grew.
    pub fn saved(&self, after: SizeEstimate) -> u64 {
        self.bytes.saturating_sub(after.bytes)
    }
}

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> u64 {
    s.encode_utf16().count() as u64
}
