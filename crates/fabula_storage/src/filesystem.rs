//! Filesystem-based image storage.

use crate::{ImagePath, ImageStorage, StoredImage};
use fabula_error::{FabulaResult, StorageError, StorageErrorKind};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// Stores images under `{base_path}/{key}` where `key` follows the
/// `stories/...` convention. Writes go to a temp file first, then rename,
/// so a crashed write never leaves a partial image at the final key.
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend, creating the base directory
    /// if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> FabulaResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem image storage");
        Ok(Self { base_path })
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    fn resolve(&self, key: &str) -> FabulaResult<PathBuf> {
        // Keys are produced by ImagePath but retrieval takes raw strings;
        // reject anything that could escape the base directory.
        if key.split('/').any(|segment| segment == "..") || Path::new(key).is_absolute() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(key.to_string())))?;
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait::async_trait]
impl ImageStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data), fields(key = %path.key(), size = data.len()))]
    async fn store(&self, path: &ImagePath, data: &[u8]) -> FabulaResult<StoredImage> {
        let key = path.key();
        let full_path = self.resolve(&key)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = full_path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &full_path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                full_path.display(),
                e
            )))
        })?;

        let content_hash = Self::compute_hash(data);
        tracing::info!(key = %key, hash = %content_hash, "Stored image");

        Ok(StoredImage {
            key,
            content_hash,
            size_bytes: data.len() as i64,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn retrieve(&self, key: &str) -> FabulaResult<Vec<u8>> {
        let full_path = self.resolve(key)?;
        let data = tokio::fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(key.to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    full_path.display(),
                    e
                )))
            }
        })?;
        Ok(data)
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, key: &str) -> FabulaResult<bool> {
        let full_path = self.resolve(key)?;
        Ok(tokio::fs::try_exists(&full_path).await.unwrap_or(false))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, key: &str) -> FabulaResult<()> {
        let full_path = self.resolve(key)?;
        tokio::fs::remove_file(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(key.to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "delete {}: {}",
                    full_path.display(),
                    e
                )))
            }
        })?;
        tracing::info!(key = %key, "Deleted image");
        Ok(())
    }
}
