use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    url_prefix: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for uploaded files (e.g., "uploads")
    /// * `url_prefix` - Public path the static file route serves them under (e.g., "/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, url_prefix: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            url_prefix,
        })
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Convert storage key to filesystem path
    ///
    /// Keys are flat filenames; anything that could address another directory
    /// is rejected.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.contains("..")
            || storage_key.contains('/')
            || storage_key.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }
}

/// Write `data` to a freshly created file and flush it to disk.
///
/// On any failure the partial file is removed so nothing half-written stays
/// reachable under the public prefix.
async fn write_new_file(path: &Path, mut file: fs::File, data: &[u8]) -> StorageResult<()> {
    let written: std::io::Result<()> = async {
        file.write_all(data).await?;
        file.flush().await?;
        file.sync_all().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        if let Err(remove_err) = fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %remove_err,
                "Failed to remove partially written upload"
            );
        }
        return Err(StorageError::UploadFailed(format!(
            "Failed to write file {}: {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let file = fs::File::create_new(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        write_new_file(&path, file, &data).await?;

        let url = self.public_url(storage_key);

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok((storage_key.to_string(), url))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key = %storage_key, "Local storage file deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.url_prefix.trim_end_matches('/'), storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_upload_filename;
    use tempfile::tempdir;

    async fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "/uploads".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_upload() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let key = generate_upload_filename(Some("png"));
        let data = b"not really a png".to_vec();

        let (stored_key, url) = storage
            .upload(&key, "image/png", data.clone())
            .await
            .unwrap();

        assert_eq!(stored_key, key);
        assert_eq!(url, format!("/uploads/{}", key));
        assert_eq!(std::fs::read(dir.path().join(&key)).unwrap(), data);
    }

    #[tokio::test]
    async fn test_creates_missing_base_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("uploads");
        let storage = LocalStorage::new(&nested, "/uploads/".to_string())
            .await
            .unwrap();

        assert!(nested.is_dir());
        assert_eq!(storage.public_url("a.png"), "/uploads/a.png");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.upload("nested/file.png", "image/png", vec![1]).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.upload("..\\file.png", "image/png", vec![1]).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_upload_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        storage.upload("same.png", "image/png", vec![1]).await.unwrap();
        let result = storage.upload("same.png", "image/png", vec![2]).await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
        assert_eq!(std::fs::read(dir.path().join("same.png")).unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_local_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        storage.upload("gone.png", "image/png", vec![1, 2]).await.unwrap();
        assert!(dir.path().join("gone.png").exists());

        storage.delete("gone.png").await.unwrap();
        assert!(!dir.path().join("gone.png").exists());

        // Deleting again is fine
        assert!(storage.delete("gone.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_write_removes_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.png");
        std::fs::write(&path, b"half").unwrap();

        // A read-only handle makes every write fail
        let file = fs::File::open(&path).await.unwrap();
        let result = write_new_file(&path, file, b"not really a png").await;

        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
        assert!(!path.exists());
    }
}
