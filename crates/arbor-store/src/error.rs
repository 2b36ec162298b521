use std::path::PathBuf;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store root does not exist or is not an accessible directory.
    #[error("store root not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The index is outside the key list.
    #[error("index {index} out of range for {len} keys")]
    IndexOutOfRange { index: usize, len: usize },

    /// No blob is stored under this key.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The directory scan failed part way through.
    #[error("directory scan failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
