//! Configuration context
//!
//! A [`VaultContext`] is the unit of cache sharing: every request served by the
//! same context sees the same cache store, and two contexts never share entries.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::cache::{CacheStore, SharedCacheStore, DEFAULT_FRESHNESS_WINDOW_MS};

/// Configuration property holding the freshness window in milliseconds.
pub const CACHABLE_DURATION_PROPERTY: &str = "cachableDuration";

/// Environment variable read by [`EnvProperties`] for the freshness window.
pub const CACHABLE_DURATION_ENV: &str = "VAULT_CACHABLE_DURATION";

/// Read access to configuration properties. Values are read on every call.
pub trait ConfigurationProvider: Send + Sync {
    fn property(&self, name: &str) -> Option<String>;
}

// == Static Properties ==
/// In-memory properties that can be changed at runtime.
#[derive(Debug, Default)]
pub struct StaticProperties {
    values: RwLock<HashMap<String, String>>,
}

impl StaticProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(name.into(), value.into());
        }
    }

    pub fn unset(&self, name: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(name);
        }
    }
}

impl ConfigurationProvider for StaticProperties {
    fn property(&self, name: &str) -> Option<String> {
        self.values.read().ok()?.get(name).cloned()
    }
}

// == Environment Properties ==
/// Reads the freshness window from `VAULT_CACHABLE_DURATION`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvProperties;

impl ConfigurationProvider for EnvProperties {
    fn property(&self, name: &str) -> Option<String> {
        if name == CACHABLE_DURATION_PROPERTY {
            std::env::var(CACHABLE_DURATION_ENV).ok()
        } else {
            None
        }
    }
}

/// Parses a raw freshness window value.
///
/// Absent, blank or unparseable values fall back to the default of 10000 ms.
pub fn parse_freshness_window(raw: Option<&str>) -> u64 {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_FRESHNESS_WINDOW_MS,
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!(
                "Invalid {} value {:?}, using default of {} ms",
                CACHABLE_DURATION_PROPERTY, value, DEFAULT_FRESHNESS_WINDOW_MS
            );
            DEFAULT_FRESHNESS_WINDOW_MS
        }),
    }
}

// == Vault Context ==
/// Per-context state handed to every lookup.
#[derive(Clone)]
pub struct VaultContext {
    /// Decrypted-value cache, absent when the context was created without one
    cache: Option<SharedCacheStore>,
    properties: Arc<dyn ConfigurationProvider>,
}

impl VaultContext {
    /// Creates a context with a fresh, empty cache store.
    pub fn new(properties: Arc<dyn ConfigurationProvider>) -> Self {
        Self::with_cache(CacheStore::shared(), properties)
    }

    /// Creates a context around an existing cache store.
    pub fn with_cache(cache: SharedCacheStore, properties: Arc<dyn ConfigurationProvider>) -> Self {
        Self {
            cache: Some(cache),
            properties,
        }
    }

    /// Creates a context whose cache store was never initialized.
    pub fn without_cache(properties: Arc<dyn ConfigurationProvider>) -> Self {
        Self {
            cache: None,
            properties,
        }
    }

    pub fn cache(&self) -> Option<&SharedCacheStore> {
        self.cache.as_ref()
    }

    /// Current freshness window in milliseconds, read from configuration each call.
    pub fn freshness_window_ms(&self) -> u64 {
        let raw = self.properties.property(CACHABLE_DURATION_PROPERTY);
        parse_freshness_window(raw.as_deref())
    }
}

impl std::fmt::Debug for VaultContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultContext")
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_freshness_window_defaults() {
        assert_eq!(parse_freshness_window(None), 10_000);
        assert_eq!(parse_freshness_window(Some("")), 10_000);
        assert_eq!(parse_freshness_window(Some("   ")), 10_000);
    }

    #[test]
    fn test_parse_freshness_window_value() {
        assert_eq!(parse_freshness_window(Some("2500")), 2_500);
        assert_eq!(parse_freshness_window(Some(" 0 ")), 0);
    }

    #[test]
    fn test_parse_freshness_window_invalid() {
        assert_eq!(parse_freshness_window(Some("ten seconds")), 10_000);
        assert_eq!(parse_freshness_window(Some("-5")), 10_000);
    }

    #[test]
    fn test_freshness_window_is_read_every_time() {
        let properties = Arc::new(StaticProperties::new());
        let ctx = VaultContext::new(properties.clone());
        assert_eq!(ctx.freshness_window_ms(), 10_000);

        properties.set(CACHABLE_DURATION_PROPERTY, "300");
        assert_eq!(ctx.freshness_window_ms(), 300);

        properties.unset(CACHABLE_DURATION_PROPERTY);
        assert_eq!(ctx.freshness_window_ms(), 10_000);
    }

    #[test]
    fn test_env_properties() {
        std::env::set_var(CACHABLE_DURATION_ENV, "1234");
        assert_eq!(
            EnvProperties.property(CACHABLE_DURATION_PROPERTY),
            Some("1234".to_string())
        );
        assert_eq!(EnvProperties.property("somethingElse"), None);
        std::env::remove_var(CACHABLE_DURATION_ENV);
    }

    #[test]
    fn test_contexts_do_not_share_stores() {
        let properties: Arc<dyn ConfigurationProvider> = Arc::new(StaticProperties::new());
        let first = VaultContext::new(properties.clone());
        let second = VaultContext::new(properties);

        let a = first.cache().unwrap();
        let b = second.cache().unwrap();
        assert!(!Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_context_without_cache() {
        let ctx = VaultContext::without_cache(Arc::new(StaticProperties::new()));
        assert!(ctx.cache().is_none());
    }
}
