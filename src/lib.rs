//! Secure Vault Cache - A time-bounded cache in front of a secret resolver
//!
//! Decrypted secrets are kept per configuration context and re-resolved once
//! their freshness window has passed.

pub mod cache;
pub mod config;
pub mod error;
pub mod vault;

pub use config::Config;
pub use error::{ResolverError, Result, VaultError};
pub use vault::{SecretSource, VaultContext, VaultLookupService};
