use crate::{LocalStorage, Storage, StorageResult};
use formintake_core::Config;
use std::sync::Arc;

/// Create the upload storage backend from configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(
        config.uploads_dir(),
        config.uploads_url_prefix().to_string(),
    )
    .await?;

    tracing::info!(
        uploads_dir = %storage.base_path().display(),
        url_prefix = %config.uploads_url_prefix(),
        "Upload storage initialized"
    );

    Ok(Arc::new(storage))
}
