//! The [`Storage`] seam between the upload handlers and the bucket holding processed videos.

use crate::StorageBackend;
use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    /// Empty, absolute, or containing `..`
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("storage misconfigured: {0}")]
    ConfigError(String),
}

impl From<StorageError> for tubely_core::AppError {
    fn from(err: StorageError) -> Self {
        tubely_core::AppError::Storage(err.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Object storage for processed videos, backed by S3 or a local directory.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Drain `reader` into the object at `storage_key`, replacing any existing object.
    ///
    /// `content_type` is stored as object metadata where the backend has any.
    /// `content_length` is a hint only. Returns the byte count actually written.
    async fn upload_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        content_length: Option<u64>,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<u64>;

    fn backend_type(&self) -> StorageBackend;
}
