//! Fast-start remuxing through `ffmpeg`.

use crate::command::{validate_executable, validate_path};
use crate::error::ProcessingError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Produces a copy of a video with its index moved to the front of the file.
#[async_trait]
pub trait Remuxer: Send + Sync {
    /// Returns the path of the remuxed copy. The caller owns (and must remove) it.
    async fn remux_fast_start(&self, input: &Path) -> Result<PathBuf, ProcessingError>;
}

/// `<input>.processing`, next to the input file
pub fn fast_start_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".processing");
    PathBuf::from(name)
}

pub struct FfmpegRemuxer {
    ffmpeg_path: String,
}

impl FfmpegRemuxer {
    pub fn new(ffmpeg_path: impl Into<String>) -> Result<Self, ProcessingError> {
        let ffmpeg_path = ffmpeg_path.into();
        validate_executable(&ffmpeg_path)?;
        Ok(Self { ffmpeg_path })
    }
}

#[async_trait]
impl Remuxer for FfmpegRemuxer {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn remux_fast_start(&self, input: &Path) -> Result<PathBuf, ProcessingError> {
        let start = std::time::Instant::now();
        validate_path(input)?;
        let output_path = fast_start_output_path(input);

        let result = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(&output_path)
            .kill_on_drop(true)
            .output()
            .await;

        let failure = match result {
            Ok(output) if output.status.success() => None,
            Ok(output) => Some(ProcessingError::ToolFailed {
                tool: "ffmpeg",
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            Err(source) => Some(ProcessingError::Spawn {
                tool: "ffmpeg",
                source,
            }),
        };

        if let Some(err) = failure {
            // ffmpeg may leave a partial file behind
            if let Err(e) = tokio::fs::remove_file(&output_path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        error = %e,
                        path = %output_path.display(),
                        "Failed to remove partial remux output"
                    );
                }
            }
            return Err(err);
        }

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            output = %output_path.display(),
            "Fast-start remux completed"
        );

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_appends_suffix() {
        assert_eq!(
            fast_start_output_path(Path::new("/tmp/tubely-upload123.mp4")),
            PathBuf::from("/tmp/tubely-upload123.mp4.processing")
        );
    }

    #[tokio::test]
    async fn test_missing_binary_fails_to_spawn() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let remuxer = FfmpegRemuxer::new("tubely-missing-ffmpeg").unwrap();
        let err = remuxer.remux_fast_start(file.path()).await.unwrap_err();
        assert!(matches!(err, ProcessingError::Spawn { tool: "ffmpeg", .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_leaves_no_output_behind() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("upload.mp4");
        std::fs::write(&input, b"bytes").unwrap();
        // A stale partial output from a crashed run
        std::fs::write(fast_start_output_path(&input), b"partial").unwrap();

        let remuxer = FfmpegRemuxer::new("false").unwrap();
        let err = remuxer.remux_fast_start(&input).await.unwrap_err();

        assert!(matches!(err, ProcessingError::ToolFailed { tool: "ffmpeg", .. }));
        assert!(!fast_start_output_path(&input).exists());
    }
}
