//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to check key derivation and the freshness rules of the lookup service.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheKey, ManualClock};
use crate::vault::{
    InMemoryConfigStore, MapSecretResolver, SecretSource, StaticProperties, VaultContext,
    VaultLookupService, CACHABLE_DURATION_PROPERTY,
};

// == Strategies ==
/// Generates aliases (never containing the key separator)
fn alias_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.\\-]{1,64}"
}

/// Generates source identifiers
fn source_id_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}:[a-z]{1,8}"
}

/// Generates plaintext secrets
fn secret_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9!@#]{1,128}"
}

fn service_with(
    resolver: Arc<MapSecretResolver>,
    clock: Arc<ManualClock>,
) -> VaultLookupService {
    tokio_test::block_on(VaultLookupService::new(resolver, &InMemoryConfigStore::new()))
        .unwrap()
        .with_clock(clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Identical inputs always produce identical keys.
    #[test]
    fn prop_key_is_deterministic(alias in alias_strategy(), source in source_id_strategy()) {
        prop_assert_eq!(CacheKey::new(&alias, &source), CacheKey::new(&alias, &source));
    }

    // The same alias under different sources never shares a key.
    #[test]
    fn prop_key_separates_sources(
        alias in alias_strategy(),
        first in source_id_strategy(),
        second in source_id_strategy()
    ) {
        prop_assume!(first != second);
        prop_assert_ne!(CacheKey::new(&alias, &first), CacheKey::new(&alias, &second));
    }

    // Distinct (alias, source) pairs map to distinct keys.
    #[test]
    fn prop_key_is_injective(
        a in (alias_strategy(), source_id_strategy()),
        b in (alias_strategy(), source_id_strategy())
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(CacheKey::new(&a.0, &a.1), CacheKey::new(&b.0, &b.1));
    }

    // A lookup within the window is served from cache; past it the resolver runs again.
    #[test]
    fn prop_resolver_called_only_after_window(
        alias in alias_strategy(),
        secret in secret_strategy(),
        window in 0u64..100_000,
        start in 0u64..1_000_000,
        elapsed in 0u64..200_000
    ) {
        let resolver = Arc::new(MapSecretResolver::new().with_secret(alias.clone(), secret.clone()));
        let clock = Arc::new(ManualClock::new(start));
        let service = service_with(resolver.clone(), clock.clone());
        let properties = Arc::new(StaticProperties::new().with(CACHABLE_DURATION_PROPERTY, window.to_string()));
        let ctx = VaultContext::new(properties);

        let first = tokio_test::block_on(service.resolve(&alias, &ctx)).unwrap();
        prop_assert_eq!(first.as_deref(), Some(secret.as_str()));

        clock.advance(elapsed);
        let second = tokio_test::block_on(service.resolve(&alias, &ctx)).unwrap();
        prop_assert_eq!(second.as_deref(), Some(secret.as_str()));

        let expected_calls = if elapsed <= window { 1 } else { 2 };
        prop_assert_eq!(resolver.calls(), expected_calls);
    }

    // A successful resolution leaves exactly one entry stamped with the resolution time.
    #[test]
    fn prop_resolution_stores_one_entry(
        alias in alias_strategy(),
        secret in secret_strategy(),
        now in 0u64..1_000_000_000
    ) {
        let resolver = Arc::new(MapSecretResolver::new().with_secret(alias.clone(), secret.clone()));
        let clock = Arc::new(ManualClock::new(now));
        let service = service_with(resolver, clock);
        let ctx = VaultContext::new(Arc::new(StaticProperties::new()));

        tokio_test::block_on(service.resolve(&alias, &ctx)).unwrap();

        let store = tokio_test::block_on(ctx.cache().unwrap().read());
        let key = CacheKey::new(&alias, &SecretSource::default().cache_id());
        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.get(&key), Some(CacheEntry::new(secret, now)));
    }

    // Nothing resolved and nothing cached before: no value, no entry.
    #[test]
    fn prop_empty_resolution_is_not_cached(alias in alias_strategy()) {
        let resolver = Arc::new(MapSecretResolver::new());
        let service = service_with(resolver, Arc::new(ManualClock::new(0)));
        let ctx = VaultContext::new(Arc::new(StaticProperties::new()));

        let value = tokio_test::block_on(service.resolve(&alias, &ctx)).unwrap();

        prop_assert!(value.is_none());
        prop_assert!(tokio_test::block_on(ctx.cache().unwrap().read()).is_empty());
    }
}
