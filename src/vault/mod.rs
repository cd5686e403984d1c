//! Vault Module
//!
//! The lookup service and the collaborators it talks to: the secret resolver,
//! the configuration context and the bootstrap store.

mod bootstrap;
mod context;
mod resolver;
mod service;
mod source;

pub use bootstrap::{
    ensure_vault_repository, ConfigStore, InMemoryConfigStore, StoreError, SECURE_VAULT_REPOSITORY,
};
pub use context::{
    parse_freshness_window, ConfigurationProvider, EnvProperties, StaticProperties, VaultContext,
    CACHABLE_DURATION_ENV, CACHABLE_DURATION_PROPERTY,
};
pub use resolver::{EnvSecretResolver, MapSecretResolver, SecretResolver};
pub use service::VaultLookupService;
pub use source::{SecretSource, SourceKind};
