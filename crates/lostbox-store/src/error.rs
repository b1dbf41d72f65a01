use thiserror::Error;

/// Errors from record and object store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A transient backend failure (dropped connection, timed-out fetch).
    /// The retry decorator recognizes this variant and retries.
    #[error("transient store failure: {0}")]
    Transient(String),

    /// An unexpected, non-retryable backend failure.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A row with the same id already exists.
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` if the operation may succeed when retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
