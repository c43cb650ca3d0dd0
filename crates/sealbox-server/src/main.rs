//! Sealbox Server — application entry point.
//!
//! Reads configuration from the environment, connects to the store,
//! applies migrations, and seeds the demo workspace. The HTTP layer is
//! mounted on top of the tenant-scoped services from `sealbox-tenant`
//! and the signup flow from `sealbox-auth`.

use sealbox_crypto::SecretCipher;
use sealbox_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sealbox=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Sealbox server...");

    if let Err(err) = run().await {
        tracing::error!(error = %err, "startup failed");
        std::process::exit(1);
    }

    tracing::info!("Sealbox server stopped.");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DbConfig::from_env();
    let manager = DbManager::connect(&db_config).await?;
    sealbox_db::run_migrations(manager.client()).await?;
    sealbox_db::seed_demo(manager.client()).await?;

    // Validate the process encryption key up front. A bad value only
    // disables secret-handling paths; everything else keeps running.
    match std::env::var("SEALBOX_ENCRYPTION_KEY") {
        Ok(material) => {
            if let Err(err) = SecretCipher::from_material(&material) {
                tracing::error!(
                    error = %err,
                    "SEALBOX_ENCRYPTION_KEY is unusable; provider-key operations will fail"
                );
            }
        }
        Err(_) => {
            tracing::warn!(
                "SEALBOX_ENCRYPTION_KEY not set; provider-key operations will fail"
            );
        }
    }

    // TODO: mount the HTTP router on top of the tenant services.

    tracing::info!("Sealbox server initialized.");
    Ok(())
}
