//! Cache Entry Module
//!
//! Defines a decrypted secret held in the cache together with its insertion time.

use chrono::Utc;

// == Cache Entry ==
/// A decrypted secret and the time it was resolved.
///
/// Entries are never modified after insertion; a re-resolution replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The decrypted value
    pub value: String,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry for `value` resolved at `inserted_at` (Unix milliseconds).
    pub fn new(value: String, inserted_at: u64) -> Self {
        Self { value, inserted_at }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still within `window_ms` at time `now`.
    ///
    /// Boundary condition: an entry is fresh up to and including
    /// `inserted_at + window_ms`; it becomes stale one millisecond later.
    pub fn is_fresh(&self, now: u64, window_ms: u64) -> bool {
        now <= self.inserted_at.saturating_add(window_ms)
    }

    // == Age ==
    /// Returns how long ago the entry was inserted, in milliseconds.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.inserted_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
