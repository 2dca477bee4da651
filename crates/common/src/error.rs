//! Error types shared across ClipTrim crates.

use std::path::PathBuf;

/// Top-level error type for ClipTrim operations.
///
/// Every failure is caught at the operation boundary and turned into a
/// user-visible message; none of these is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum CliptrimError {
    /// Invalid user input, caught before any mutation is attempted.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The trimming operation failed. No record is created.
    #[error("Processing error: {message}")]
    Processing { message: String },

    /// The clip store could not be read or written.
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Access to the source media was denied.
    #[error("Permission denied: {message}")]
    Permission { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Another optimistic mutation for the same clip is still in flight.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CliptrimError.
pub type CliptrimResult<T> = Result<T, CliptrimError>;

impl CliptrimError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence {
            message: msg.into(),
        }
    }

    pub fn permission(msg: impl Into<String>) -> Self {
        Self::Permission {
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound {
            message: msg.into(),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether this is an input validation failure (no state was touched).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this failure came from the trimming operation.
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    /// Whether this failure came from the clip store.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_message() {
        let err = CliptrimError::processing("ffmpeg exited with 1");
        assert_eq!(err.to_string(), "Processing error: ffmpeg exited with 1");
        assert!(err.is_processing());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: CliptrimError = io.into();
        assert!(matches!(err, CliptrimError::Io(_)));
    }
}
