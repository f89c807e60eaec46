//! Storage abstraction trait
//!
//! This module defines the Storage trait that file intake backends implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The HTTP layer writes uploaded files through this trait and never touches
/// the filesystem directly.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a file under `storage_key` and return (storage_key, public_url)
    ///
    /// The public URL is a relative reference that the static file route can
    /// resolve later.
    async fn upload(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)>;

    /// Delete a stored file. Deleting a missing file is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Public URL for a key
    fn public_url(&self, storage_key: &str) -> String;
}
