//! Error types for the watcher.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from setting up or changing a watch subscription.
///
/// Errors reported by the notification backend once the loop is running
/// are logged rather than returned.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to initialize watcher: {reason}")]
    InitFailed { reason: String },

    #[error("Cannot watch path {path}: {reason}")]
    PathWatchFailed { path: PathBuf, reason: String },

    #[error("Watcher is closed")]
    Closed,
}

impl From<notify::Error> for WatchError {
    fn from(e: notify::Error) -> Self {
        WatchError::InitFailed {
            reason: e.to_string(),
        }
    }
}

impl WatchError {
    pub(crate) fn path(path: impl Into<PathBuf>, e: notify::Error) -> Self {
        WatchError::PathWatchFailed {
            path: path.into(),
            reason: e.to_string(),
        }
    }
}
