//! Application setup and initialization
//!
//! This module contains all startup wiring: telemetry, the database
//! connection, upload storage, and the router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use formintake_core::Config;
use std::sync::Arc;

/// Initialize the entire application
///
/// A database that cannot be reached does not stop startup; the state then
/// carries no store and store-backed requests fail with `NotConnected`.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let store = database::connect_store(&config).await;

    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(config.clone(), store, storage));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
