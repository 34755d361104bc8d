//! Error types for the storage layer.

use std::path::PathBuf;

use thiserror::Error;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists under the requested name.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The record name is absolute or escapes the store root.
    #[error("invalid record name: {0}")]
    InvalidName(String),

    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether this error means the record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
