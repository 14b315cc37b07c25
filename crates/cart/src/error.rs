//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`CartStorage`](crate::CartStorage) backend.
///
/// The cart itself never fails; these only surface when the backend
/// underneath it cannot read or write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of string values.
    #[error("storage file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// A value could not be encoded as JSON.
    #[error("failed to encode storage value: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
