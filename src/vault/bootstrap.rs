//! Vault repository bootstrap
//!
//! Makes sure the collection that holds vault metadata exists in the backing
//! configuration store before the lookup service is handed out.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{Result, VaultError};

/// Default location of the vault collection.
pub const SECURE_VAULT_REPOSITORY: &str = "/repository/components/secure-vault";

/// Error reported by a configuration store.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Backing configuration store, used only during bootstrap.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn exists(&self, path: &str) -> std::result::Result<bool, StoreError>;

    async fn create_collection(&self, path: &str) -> std::result::Result<(), StoreError>;
}

/// Creates the vault collection at `path` unless it already exists.
///
/// A failing existence check is treated as "absent".
pub async fn ensure_vault_repository(store: &dyn ConfigStore, path: &str) -> Result<()> {
    let exists = match store.exists(path).await {
        Ok(exists) => exists,
        Err(e) => {
            debug!("Existence check for {} failed: {}", path, e);
            false
        }
    };

    if exists {
        debug!("Vault repository {} already present", path);
        return Ok(());
    }

    store.create_collection(path).await.map_err(|e| {
        VaultError::Configuration(format!("Error while initializing the registry at {path}: {e}"))
    })?;
    info!("Created vault repository at {}", path);
    Ok(())
}

// == In-Memory Store ==
/// Configuration store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    collections: Mutex<HashSet<String>>,
    read_only: AtomicBool,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses every create; lets callers exercise bootstrap failure.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    pub fn collection_count(&self) -> usize {
        self.collections.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn exists(&self, path: &str) -> std::result::Result<bool, StoreError> {
        let collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::from("collection set poisoned"))?;
        Ok(collections.contains(path))
    }

    async fn create_collection(&self, path: &str) -> std::result::Result<(), StoreError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(format!("store is read-only, cannot create {path}").into());
        }
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::from("collection set poisoned"))?;
        collections.insert(path.to_string());
        Ok(())
    }
}
