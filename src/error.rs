//! Error types for the vault cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

/// Opaque error produced by a secret resolver. Passed through unchanged.
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

// == Vault Error Enum ==
/// Unified error type for the vault lookup service.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Backing configuration store unreachable or could not be initialized
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure reported by the secret resolver
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

// == Result Type Alias ==
/// Convenience Result type for the vault cache.
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_message() {
        let err = VaultError::Configuration("registry unavailable".to_string());
        assert_eq!(err.to_string(), "Configuration error: registry unavailable");
    }

    #[test]
    fn test_resolver_error_is_transparent() {
        let inner: ResolverError = "keystore locked".into();
        let err = VaultError::from(inner);
        assert_eq!(err.to_string(), "keystore locked");
        assert!(matches!(err, VaultError::Resolver(_)));
    }
}
