//! Secure Vault Cache - command line lookup
//!
//! Resolves each alias given on the command line through the shared vault
//! lookup service and prints `alias=value`.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use secure_vault_cache::vault::{EnvProperties, EnvSecretResolver, InMemoryConfigStore};
use secure_vault_cache::{Config, VaultContext, VaultLookupService};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Bootstrap the vault repository and build the shared lookup service
/// 4. Resolve every alias passed as an argument
/// 5. Log lookup statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "secure_vault_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: repository={}, secret_prefix={}, cache_enabled={}",
        config.repository_path, config.secret_prefix, config.cache_enabled
    );

    let store = InMemoryConfigStore::new();
    let resolver = Arc::new(EnvSecretResolver::new(config.secret_prefix.clone()));
    let service = VaultLookupService::shared(resolver, &store, &config.repository_path)
        .await
        .context("failed to initialize vault lookup service")?;
    info!("Lookup service ready: {}", service.provider_name());

    let properties = Arc::new(EnvProperties);
    let ctx = if config.cache_enabled {
        VaultContext::new(properties)
    } else {
        VaultContext::without_cache(properties)
    };

    for alias in std::env::args().skip(1) {
        let value = service
            .resolve(&alias, &ctx)
            .await
            .with_context(|| format!("failed to resolve {alias}"))?;
        match value {
            Some(secret) => println!("{alias}={secret}"),
            None => println!("{alias}=<none>"),
        }
    }

    let stats = serde_json::to_string(&service.stats())?;
    info!("Lookup stats: {}", stats);
    Ok(())
}
