//! Error types for path, I/O and download operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from operations that propagate failures.
///
/// Queries that swallow failures (`exists`, `size`, `read_text`, ...) never
/// produce this type; their `try_*` siblings do.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Lock on {path} is held by another owner")]
    LockHeld { path: PathBuf },

    #[error("Not supported on this platform: {0}")]
    Unsupported(&'static str),

    #[error("Working directory is unavailable")]
    NoWorkingDirectory,
}

impl FsError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying I/O error is `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type FsResult<T> = Result<T, FsError>;
