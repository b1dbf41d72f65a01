use thiserror::Error;

/// Errors produced when parsing lostbox identifiers and keys.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid list id: {0}")]
    InvalidListId(String),

    #[error("invalid item id: {0}")]
    InvalidItemId(String),

    #[error("invalid blob key: {reason}")]
    InvalidBlobKey { reason: String },
}
