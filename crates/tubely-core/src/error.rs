//! Error types module
//!
//! All failures surfaced by the API are unified under [`AppError`]. Each variant
//! describes its own HTTP presentation through [`ErrorMetadata`], so the HTTP layer
//! only has to render what the error reports about itself.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Severity an error is logged at when it reaches the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Caller mistakes: bad ids, missing tokens, bad forms
    Debug,
    Warn,
    /// Server-side failures
    Error,
}

/// How an error presents itself to API clients
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable upper-snake-case code, e.g. `STORAGE_ERROR`
    fn error_code(&self) -> &'static str;

    /// Text for the `error` field of the response body
    fn client_message(&self) -> String;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Media processing error: {0}")]
    MediaProcessing(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Internal failure whose `message` is safe to show to clients while
    /// `source` carries the underlying cause for the logs.
    #[error("{message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Build an [`AppError::InternalWithSource`] from a client message and its cause.
    pub fn internal<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        AppError::InternalWithSource {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Variant name, recorded as `error_type` in logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::MediaProcessing(_) => "MediaProcessing",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Display text followed by up to five levels of `Caused by:` lines.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        const MAX_CAUSES: usize = 5;
        let mut causes = std::iter::successors(self.source(), |&err| err.source());
        let mut details = self.to_string();
        for cause in causes.by_ref().take(MAX_CAUSES) {
            details.push_str("\n  Caused by: ");
            details.push_str(&cause.to_string());
        }
        if causes.next().is_some() {
            details.push_str("\n  ... (truncated)");
        }
        details
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::Unauthorized(_) => 401,
            AppError::NotFound(_) => 404,
            AppError::Database(_)
            | AppError::Storage(_)
            | AppError::MediaProcessing(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::MediaProcessing(_) => "MEDIA_PROCESSING_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        let message = match self {
            AppError::InvalidInput(msg) | AppError::NotFound(msg) | AppError::Unauthorized(msg) => {
                msg.as_str()
            }
            AppError::InternalWithSource { message, .. } => message.as_str(),
            AppError::Database(_) => "Failed to access database",
            AppError::Storage(_) => "Failed to access storage",
            AppError::MediaProcessing(_) => "Failed to process media",
            AppError::Internal(_) => "Internal server error",
        };
        message.to_string()
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) | AppError::NotFound(_) | AppError::Unauthorized(_) => {
                LogLevel::Debug
            }
            _ => LogLevel::Error,
        }
    }
}
