//! Storage setup and initialization

use anyhow::{Context, Result};
use formintake_core::Config;
use formintake_storage::{create_storage, Storage};
use std::sync::Arc;

/// Setup the local upload storage
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing upload storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize upload storage")?;
    Ok(storage)
}
