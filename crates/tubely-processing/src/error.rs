use thiserror::Error;

/// Failures from running or interpreting external media tools
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Failed to parse ffprobe output: {0}")]
    InvalidOutput(#[from] serde_json::Error),

    #[error("No streams found in video")]
    NoStreams,
}

impl From<ProcessingError> for tubely_core::AppError {
    fn from(err: ProcessingError) -> Self {
        tubely_core::AppError::MediaProcessing(err.to_string())
    }
}
