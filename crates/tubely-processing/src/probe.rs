//! Stream inspection through `ffprobe`.

use crate::aspect_ratio::VideoDimensions;
use crate::command::{validate_executable, validate_path};
use crate::error::ProcessingError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;

/// Reports the dimensions of a media file on disk.
#[async_trait]
pub trait MediaInspector: Send + Sync {
    async fn inspect(&self, path: &Path) -> Result<VideoDimensions, ProcessingError>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

/// Parse `ffprobe -print_format json -show_streams` output.
///
/// Only the first stream is considered. Streams without dimensions (audio) report 0x0.
pub fn parse_probe_output(stdout: &[u8]) -> Result<VideoDimensions, ProcessingError> {
    let probe: ProbeOutput = serde_json::from_slice(stdout)?;
    let stream = probe.streams.first().ok_or(ProcessingError::NoStreams)?;
    Ok(VideoDimensions::new(stream.width, stream.height))
}

pub struct FfprobeInspector {
    ffprobe_path: String,
}

impl FfprobeInspector {
    pub fn new(ffprobe_path: impl Into<String>) -> Result<Self, ProcessingError> {
        let ffprobe_path = ffprobe_path.into();
        validate_executable(&ffprobe_path)?;
        Ok(Self { ffprobe_path })
    }
}

#[async_trait]
impl MediaInspector for FfprobeInspector {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn inspect(&self, path: &Path) -> Result<VideoDimensions, ProcessingError> {
        let start = std::time::Instant::now();
        validate_path(path)?;

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProcessingError::Spawn {
                tool: "ffprobe",
                source,
            })?;

        if !output.status.success() {
            return Err(ProcessingError::ToolFailed {
                tool: "ffprobe",
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let dimensions = parse_probe_output(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            width = dimensions.width,
            height = dimensions.height,
            "Video probe completed"
        );

        Ok(dimensions)
    }
}
