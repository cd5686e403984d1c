//! Vault Lookup Service
//!
//! Resolves aliases to plaintext secrets through a per-context cache.
//!
//! # Lookup
//! 1. A fresh entry for `(alias, source)` is returned without touching the resolver.
//! 2. Otherwise the caller takes the resolve lock and asks the resolver. A
//!    non-empty answer replaces the stale entry; an empty answer or an error
//!    leaves it in place and an empty answer serves it as a fallback.
//!
//! The stale fallback means an entry is served past its window for as long as the
//! resolver keeps returning nothing.

use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheKey, Clock, LookupStats, StatsSnapshot, SystemClock};
use crate::error::Result;
use crate::vault::{
    ensure_vault_repository, ConfigStore, SecretResolver, SecretSource, VaultContext,
    SECURE_VAULT_REPOSITORY,
};

static SHARED: OnceCell<Arc<VaultLookupService>> = OnceCell::const_new();

// == Vault Lookup Service ==
pub struct VaultLookupService {
    resolver: Arc<dyn SecretResolver>,
    clock: Arc<dyn Clock>,
    /// Serializes every miss across all keys and contexts
    resolve_lock: Mutex<()>,
    stats: LookupStats,
}

impl VaultLookupService {
    // == Constructors ==
    /// Bootstraps the default vault repository in `store` and builds a service.
    pub async fn new(resolver: Arc<dyn SecretResolver>, store: &dyn ConfigStore) -> Result<Self> {
        Self::with_repository(resolver, store, SECURE_VAULT_REPOSITORY).await
    }

    /// Like [`VaultLookupService::new`] with an explicit repository path.
    pub async fn with_repository(
        resolver: Arc<dyn SecretResolver>,
        store: &dyn ConfigStore,
        repository: &str,
    ) -> Result<Self> {
        ensure_vault_repository(store, repository).await?;
        Ok(Self {
            resolver,
            clock: Arc::new(SystemClock),
            resolve_lock: Mutex::new(()),
            stats: LookupStats::new(),
        })
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the process-wide service, building it on first use.
    ///
    /// Concurrent first calls are serialized and exactly one instance is built.
    /// Arguments of later calls are ignored. A failed bootstrap leaves nothing
    /// behind, so the next call tries again.
    pub async fn shared(
        resolver: Arc<dyn SecretResolver>,
        store: &dyn ConfigStore,
        repository: &str,
    ) -> Result<Arc<Self>> {
        SHARED
            .get_or_try_init(|| async move {
                info!("Initializing shared vault lookup service");
                Self::with_repository(resolver, store, repository)
                    .await
                    .map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }

    /// Name of the implementation serving lookups.
    pub fn provider_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // == Resolve ==
    /// Resolves `alias` from the default source.
    pub async fn resolve(&self, alias: &str, ctx: &VaultContext) -> Result<Option<String>> {
        self.resolve_with_source(alias, &SecretSource::default(), ctx)
            .await
    }

    /// Resolves `alias` from `source`, serving from the context cache when fresh.
    ///
    /// Returns `Ok(None)` when no secret is available. Errors only come from the
    /// resolver and are passed through unchanged.
    pub async fn resolve_with_source(
        &self,
        alias: &str,
        source: &SecretSource,
        ctx: &VaultContext,
    ) -> Result<Option<String>> {
        let key = CacheKey::new(alias, &source.cache_id());

        let Some(cache) = ctx.cache() else {
            return self.resolve_uncached(alias, source).await;
        };
        let window = ctx.freshness_window_ms();

        let cached = cache.read().await.get(&key);
        if let Some(entry) = cached {
            if entry.is_fresh(self.clock.now_ms(), window) {
                self.stats.record_hit();
                debug!("Cache hit for {}", key);
                return Ok(Some(entry.value));
            }
        }

        let _guard = self.resolve_lock.lock().await;

        // The stale entry stays in the store until it is replaced, so a caller
        // dropped while the resolver runs leaves the fallback intact.
        let previous = cache.read().await.get(&key);
        if let Some(entry) = &previous {
            if entry.is_fresh(self.clock.now_ms(), window) {
                self.stats.record_hit();
                debug!("{} refreshed while waiting for the resolve lock", key);
                return Ok(Some(entry.value.clone()));
            }
            debug!(
                "Stale entry for {} (age {} ms, window {} ms)",
                key,
                entry.age_ms(self.clock.now_ms()),
                window
            );
        }
        self.stats.record_miss();

        self.stats.record_resolution();
        let resolved = self.resolver.get_secret(alias, source).await?;

        if resolved.trim().is_empty() {
            return Ok(match previous {
                Some(entry) => {
                    self.stats.record_fallback();
                    warn!("Resolver returned nothing for {}, serving stale value", key);
                    Some(entry.value)
                }
                None => {
                    debug!("No secret available for {}", key);
                    None
                }
            });
        }

        let now = self.clock.now_ms();
        debug!("Caching resolved value for {} at {}", key, now);
        cache
            .write()
            .await
            .put(key, CacheEntry::new(resolved.clone(), now));
        Ok(Some(resolved))
    }

    /// Resolution for a context without a cache store. The value is discarded.
    async fn resolve_uncached(&self, alias: &str, source: &SecretSource) -> Result<Option<String>> {
        self.stats.record_uncached();
        let _guard = self.resolve_lock.lock().await;

        self.stats.record_resolution();
        self.resolver.get_secret(alias, source).await?;
        warn!("No cache store in context, dropping resolved value for {}", alias);
        Ok(None)
    }
}

impl std::fmt::Debug for VaultLookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultLookupService")
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}
