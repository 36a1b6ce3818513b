use thiserror::Error;

/// Failure of the underlying storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded ({needed} bytes needed, quota is {quota})")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("storage is unavailable")]
    Unavailable,

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
