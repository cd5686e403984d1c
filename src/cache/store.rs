//! Cache Store Module
//!
//! Per-context map from cache key to decrypted entry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheKey};

/// Cache store shared by every request of one configuration context.
pub type SharedCacheStore = Arc<RwLock<CacheStore>>;

// == Cache Store ==
/// Decrypted secrets keyed by [`CacheKey`].
///
/// The store does no expiry of its own. Freshness is judged by the lookup
/// service and stale entries are only removed when a lookup observes them.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-entry storage
    entries: HashMap<CacheKey, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates an empty store ready to be shared across requests.
    pub fn shared() -> SharedCacheStore {
        Arc::new(RwLock::new(Self::new()))
    }

    // == Get ==
    /// Returns a copy of the entry stored under `key`.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.get(key).cloned()
    }

    // == Put ==
    /// Stores `entry` under `key`, replacing any previous entry whole.
    ///
    /// Returns the replaced entry, if any.
    pub fn put(&mut self, key: CacheKey, entry: CacheEntry) -> Option<CacheEntry> {
        self.entries.insert(key, entry)
    }

    // == Remove ==
    /// Removes and returns the entry stored under `key`.
    pub fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.remove(key)
    }

    // == Contains ==
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    // == Clear ==
    /// Drops every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
