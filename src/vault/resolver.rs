//! Secret Resolver
//!
//! The collaborator that turns an alias into a plaintext secret. The cache only
//! calls it on a real miss, since resolutions may have side effects such as
//! audit logging.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ResolverError;
use crate::vault::SecretSource;

/// Decrypts or looks up the secret behind an alias.
///
/// An empty string means "nothing resolved" and is not an error.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    async fn get_secret(
        &self,
        alias: &str,
        source: &SecretSource,
    ) -> std::result::Result<String, ResolverError>;
}

// == Map Resolver ==
/// In-memory resolver backed by a map of alias to plaintext.
///
/// Unknown aliases resolve to an empty string. Every call is counted.
#[derive(Debug, Default)]
pub struct MapSecretResolver {
    secrets: RwLock<HashMap<String, String>>,
    calls: AtomicUsize,
}

impl MapSecretResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_secret(self, alias: impl Into<String>, plaintext: impl Into<String>) -> Self {
        self.set(alias, plaintext);
        self
    }

    /// Sets (or rotates) the plaintext behind `alias`.
    pub fn set(&self, alias: impl Into<String>, plaintext: impl Into<String>) {
        if let Ok(mut secrets) = self.secrets.write() {
            secrets.insert(alias.into(), plaintext.into());
        }
    }

    /// Makes `alias` resolve to nothing.
    pub fn remove(&self, alias: &str) {
        if let Ok(mut secrets) = self.secrets.write() {
            secrets.remove(alias);
        }
    }

    /// Number of times [`SecretResolver::get_secret`] has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretResolver for MapSecretResolver {
    async fn get_secret(
        &self,
        alias: &str,
        _source: &SecretSource,
    ) -> std::result::Result<String, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let secrets = self
            .secrets
            .read()
            .map_err(|_| ResolverError::from("secret map poisoned"))?;
        Ok(secrets.get(alias).cloned().unwrap_or_default())
    }
}

// == Environment Resolver ==
/// Resolves aliases from environment variables named `<prefix><ALIAS>`.
///
/// The alias is upper-cased and every character that is not ASCII
/// alphanumeric becomes `_`, so `db.password` reads `<prefix>DB_PASSWORD`.
#[derive(Debug, Clone)]
pub struct EnvSecretResolver {
    prefix: String,
}

impl EnvSecretResolver {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn variable_name(&self, alias: &str) -> String {
        let suffix: String = alias
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}", self.prefix, suffix)
    }
}

#[async_trait]
impl SecretResolver for EnvSecretResolver {
    async fn get_secret(
        &self,
        alias: &str,
        source: &SecretSource,
    ) -> std::result::Result<String, ResolverError> {
        let name = self.variable_name(alias);
        debug!("Resolving {} from {} via ${}", alias, source, name);
        match std::env::var(&name) {
            Ok(value) => Ok(value),
            Err(std::env::VarError::NotPresent) => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}
