//! Local filesystem implementation of the `BlobStore` port.
//!
//! Files are content-addressed: the name is the SHA-256 hash of the bytes
//! plus the caller's extension, so re-uploading identical bytes
//! deduplicates instead of accumulating copies. The returned reference is
//! relative to the media root (`<namespace>/<hash>.<ext>`), which is what
//! gets persisted on the owning record and served statically.

use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

use crate::domain::ports::{BlobStore, BlobStoreError};

/// Blob store writing under a media root directory on the local disk.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    media_root: PathBuf,
}

impl FsBlobStore {
    /// Create a store rooted at `media_root`. The directory is created on
    /// first write, not up front.
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }
}

fn write_error(err: std::io::Error) -> BlobStoreError {
    BlobStoreError::write(err.to_string())
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn save(
        &self,
        namespace: &str,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobStoreError> {
        let hash = hex::encode(Sha256::digest(&bytes));
        let file_name = format!("{hash}.{extension}");
        let dir = self.media_root.join(namespace);
        let target = dir.join(&file_name);

        fs::create_dir_all(&dir).await.map_err(write_error)?;
        if fs::try_exists(&target).await.map_err(write_error)? {
            debug!(path = %target.display(), "blob already stored, reusing");
        } else {
            fs::write(&target, &bytes).await.map_err(write_error)?;
            debug!(path = %target.display(), size = bytes.len(), "blob stored");
        }
        Ok(format!("{namespace}/{file_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_writes_the_bytes_and_returns_a_relative_reference() {
        let root = tempfile::tempdir().expect("temp dir");
        let store = FsBlobStore::new(root.path());

        let reference = store
            .save("recipes", "png", b"image-bytes".to_vec())
            .await
            .expect("save succeeds");

        assert!(reference.starts_with("recipes/"));
        assert!(reference.ends_with(".png"));
        let stored = std::fs::read(root.path().join(&reference)).expect("file exists");
        assert_eq!(stored, b"image-bytes");
    }

    #[tokio::test]
    async fn identical_bytes_deduplicate_to_one_file() {
        let root = tempfile::tempdir().expect("temp dir");
        let store = FsBlobStore::new(root.path());

        let first = store
            .save("avatars", "png", b"same".to_vec())
            .await
            .expect("save succeeds");
        let second = store
            .save("avatars", "png", b"same".to_vec())
            .await
            .expect("save succeeds");

        assert_eq!(first, second);
        let entries: Vec<_> = std::fs::read_dir(root.path().join("avatars"))
            .expect("dir exists")
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn different_bytes_get_distinct_names() {
        let root = tempfile::tempdir().expect("temp dir");
        let store = FsBlobStore::new(root.path());

        let first = store
            .save("recipes", "png", b"one".to_vec())
            .await
            .expect("save succeeds");
        let second = store
            .save("recipes", "png", b"two".to_vec())
            .await
            .expect("save succeeds");
        assert_ne!(first, second);
    }
}
