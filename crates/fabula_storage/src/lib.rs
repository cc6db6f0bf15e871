//! Image blob storage for Fabula.
//!
//! Generated panel and cover images are stored under a stable path
//! convention keyed by story, entity kind, and image id:
//!
//! ```text
//! stories/{story_id}/{entity}/original/{image_id}.{ext}
//! stories/{story_id}/{entity}/variants/{image_id}.{ext}
//! ```
//!
//! The abstraction is a trait so backends can be swapped (filesystem, object
//! store); metadata lives with the database rows, not here.
//!
//! # Example
//!
//! ```
//! use fabula_storage::{FileSystemStorage, ImageEntity, ImagePath, ImageStorage, ImageVariant};
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/fabula-images")?;
//! let path = ImagePath::new(
//!     Uuid::new_v4(),
//!     ImageEntity::Panel,
//!     ImageVariant::Original,
//!     Uuid::new_v4(),
//!     "png",
//! );
//!
//! let reference = storage.store(&path, &[0u8; 16]).await?;
//! let bytes = storage.retrieve(&reference.key).await?;
//! assert_eq!(bytes.len(), 16);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod path;

pub use fabula_error::{StorageError, StorageErrorKind};
pub use filesystem::FileSystemStorage;
pub use path::{ImageEntity, ImagePath, ImageVariant};

use fabula_error::FabulaResult;

/// A stored image: its storage key plus integrity metadata.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredImage {
    /// Storage key, the rendered [`ImagePath`]
    pub key: String,
    /// SHA-256 digest of the stored bytes
    pub content_hash: String,
    /// Size in bytes
    pub size_bytes: i64,
}

/// Trait for pluggable image storage backends.
#[async_trait::async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store image bytes at the given path.
    ///
    /// Writing the same path twice overwrites; keys embed a unique image id
    /// so collisions only happen on purpose.
    async fn store(&self, path: &ImagePath, data: &[u8]) -> FabulaResult<StoredImage>;

    /// Retrieve image bytes by storage key.
    async fn retrieve(&self, key: &str) -> FabulaResult<Vec<u8>>;

    /// Check if an image exists.
    async fn exists(&self, key: &str) -> FabulaResult<bool>;

    /// Delete an image by storage key.
    async fn delete(&self, key: &str) -> FabulaResult<()>;
}
