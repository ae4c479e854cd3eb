//! Port abstraction for the image blob store.
//!
//! The store accepts decoded image bytes and returns a stable reference
//! (a relative path) for persistence on the owning record. Generation of
//! the reference is the adapter's concern.

use async_trait::async_trait;

/// Failures raised by blob store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobStoreError {
    /// The payload could not be written.
    #[error("blob store write failed: {message}")]
    Write {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl BlobStoreError {
    /// Helper for write failures.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Write-only contract for storing uploaded images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store image bytes under the given namespace (e.g. `recipes`,
    /// `avatars`) with the given file extension; returns the stable
    /// reference to persist.
    async fn save(
        &self,
        namespace: &str,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobStoreError>;
}
