//! Database setup and initialization

use formintake_core::{AppError, Config};
use formintake_db::{PgSubmissionStore, SubmissionStore};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Connect the submission store, or log why it could not be connected.
///
/// Returns `None` on failure so the service can still start and answer
/// store-backed requests with `NotConnected`.
pub async fn connect_store(config: &Config) -> Option<Arc<dyn SubmissionStore>> {
    tracing::info!("Connecting to database...");
    match setup_database(config).await {
        Ok(store) => {
            let store: Arc<dyn SubmissionStore> = Arc::new(store);
            Some(store)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                "Database connection failed; submissions are unavailable until restart"
            );
            None
        }
    }
}

/// Build the connection pool and run pending migrations
async fn setup_database(config: &Config) -> Result<PgSubmissionStore, AppError> {
    let store = PgSubmissionStore::connect(
        config.database_url(),
        config.db_max_connections(),
        Duration::from_secs(config.db_timeout_seconds()),
    )
    .await?;

    // Workspace migrations/ relative to this crate's root
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    store.run_migrations(&migrations_dir).await?;

    Ok(store)
}
