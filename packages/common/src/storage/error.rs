use thiserror::Error;

use crate::filename::FilenameError;

/// Errors that can occur during upload directory operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No regular file exists under the requested name.
    #[error("file not found: {0}")]
    NotFound(String),
    /// The name cannot address a single entry of the upload directory.
    #[error("invalid filename {name:?}: {reason}")]
    InvalidFilename { name: String, reason: FilenameError },
    /// The file exceeds the configured size limit.
    #[error("file exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
