//! Cache Module
//!
//! Provides the decrypted-secret cache: keys, entries, the per-context store,
//! lookup statistics and the clock used to judge freshness.

mod clock;
mod entry;
mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{current_timestamp_ms, CacheEntry};
pub use key::{CacheKey, KEY_SEPARATOR};
pub use stats::{LookupStats, StatsSnapshot};
pub use store::{CacheStore, SharedCacheStore};

// == Public Constants ==
/// Freshness window applied when the configuration leaves it unset (milliseconds)
pub const DEFAULT_FRESHNESS_WINDOW_MS: u64 = 10_000;
