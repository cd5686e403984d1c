//! Configuration Module
//!
//! Handles loading the vault cache configuration from environment variables.
//!
//! The freshness window is deliberately not part of this struct: it is a
//! per-lookup property read through the context on every call.

use std::env;

use tracing::warn;

use crate::vault::SECURE_VAULT_REPOSITORY;

/// Vault cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the vault collection in the backing configuration store
    pub repository_path: String,
    /// Prefix of the environment variables holding secrets
    pub secret_prefix: String,
    /// Whether contexts get a cache store
    pub cache_enabled: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `VAULT_REPOSITORY_PATH` - Vault collection path (default: `/repository/components/secure-vault`)
    /// - `VAULT_SECRET_PREFIX` - Secret variable prefix (default: `VAULT_SECRET_`)
    /// - `VAULT_CACHE_ENABLED` - Enable the decrypted-value cache (default: true, also 1/0, yes/no, on/off)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            repository_path: env::var("VAULT_REPOSITORY_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.repository_path),
            secret_prefix: env::var("VAULT_SECRET_PREFIX")
                .ok()
                .unwrap_or(defaults.secret_prefix),
            cache_enabled: parse_flag(
                "VAULT_CACHE_ENABLED",
                env::var("VAULT_CACHE_ENABLED").ok().as_deref(),
                defaults.cache_enabled,
            ),
        }
    }
}

/// Parses a boolean setting. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
///
/// Unset or blank values use `default`; anything else logs a warning and uses `default`.
fn parse_flag(name: &str, raw: Option<&str>, default: bool) -> bool {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => default,
        Some("true" | "1" | "yes" | "on") => true,
        Some("false" | "0" | "no" | "off") => false,
        Some(other) => {
            warn!("Invalid {} value {:?}, using default of {}", name, other, default);
            default
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository_path: SECURE_VAULT_REPOSITORY.to_string(),
            secret_prefix: "VAULT_SECRET_".to_string(),
            cache_enabled: true,
        }
    }
}
