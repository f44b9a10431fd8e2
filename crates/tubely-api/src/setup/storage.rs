//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{create_storage, Storage};

/// Build the object store that receives processed videos.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(
        backend = %storage.backend_type(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}

/// Make sure the thumbnail and staging directories exist.
pub async fn prepare_directories(config: &Config) -> Result<()> {
    for dir in [config.assets_root(), config.temp_dir()] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    tracing::debug!(
        assets_root = %config.assets_root().display(),
        temp_dir = %config.temp_dir().display(),
        "Local directories ready"
    );
    Ok(())
}
