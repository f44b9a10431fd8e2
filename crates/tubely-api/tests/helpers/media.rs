//! In-process stand-ins for ffprobe, ffmpeg and the object store.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::AsyncRead;
use tubely_processing::{
    fast_start_output_path, MediaInspector, ProcessingError, Remuxer, VideoDimensions,
};
use tubely_storage::{Storage, StorageBackend, StorageError, StorageResult};

/// Reports fixed dimensions, or fails as if ffprobe found no streams.
#[derive(Clone)]
pub struct FakeInspector {
    dimensions: Option<VideoDimensions>,
}

impl FakeInspector {
    pub fn reporting(width: u32, height: u32) -> Self {
        Self {
            dimensions: Some(VideoDimensions::new(width, height)),
        }
    }

    pub fn failing() -> Self {
        Self { dimensions: None }
    }
}

#[async_trait]
impl MediaInspector for FakeInspector {
    async fn inspect(&self, path: &Path) -> Result<VideoDimensions, ProcessingError> {
        assert!(path.exists(), "inspected file should be staged on disk");
        self.dimensions.ok_or(ProcessingError::NoStreams)
    }
}

/// Copies the input to `<input>.processing`, or fails without producing output.
#[derive(Clone, Default)]
pub struct FakeRemuxer {
    fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl FakeRemuxer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Remuxer for FakeRemuxer {
    async fn remux_fast_start(&self, input: &Path) -> Result<PathBuf, ProcessingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProcessingError::InvalidPath(format!(
                "refusing to remux {}",
                input.display()
            )));
        }

        let output = fast_start_output_path(input);
        tokio::fs::copy(input, &output)
            .await
            .map_err(|e| ProcessingError::InvalidPath(e.to_string()))?;
        Ok(output)
    }
}

/// Object store that rejects every upload after counting it.
#[derive(Clone, Default)]
pub struct UnreachableStorage {
    pub attempts: Arc<AtomicUsize>,
}

impl UnreachableStorage {
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for UnreachableStorage {
    async fn upload_stream(
        &self,
        storage_key: &str,
        _content_type: &str,
        _content_length: Option<u64>,
        _reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<u64> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::UploadFailed(format!(
            "connection refused while writing {}",
            storage_key
        )))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
