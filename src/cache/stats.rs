//! Lookup Statistics Module
//!
//! Tracks how lookups were served: cache hits, misses, resolver calls and fallbacks.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Lookup Stats ==
/// Lock-free counters updated by the lookup service.
#[derive(Debug, Default)]
pub struct LookupStats {
    hits: AtomicU64,
    misses: AtomicU64,
    resolutions: AtomicU64,
    fallbacks: AtomicU64,
    uncached: AtomicU64,
}

impl LookupStats {
    // == Constructor ==
    /// Creates a new LookupStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup served from a fresh entry.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Lookup found no fresh entry.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Secret resolver was invoked.
    pub fn record_resolution(&self) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Stale value served because the resolver returned nothing.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Lookup made against a context without a cache store.
    pub fn record_uncached(&self) {
        self.uncached.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Returns a point-in-time copy of the counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            resolutions: self.resolutions.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            uncached: self.uncached.load(Ordering::Relaxed),
        }
    }
}

// == Stats Snapshot ==
/// Serializable copy of [`LookupStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Lookups served from a fresh entry
    pub hits: u64,
    /// Lookups that found no fresh entry
    pub misses: u64,
    /// Secret resolver invocations
    pub resolutions: u64,
    /// Stale values served after an empty resolution
    pub fallbacks: u64,
    /// Lookups against contexts without a cache store
    pub uncached: u64,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
