use lostbox_store::StoreError;
use thiserror::Error;

use crate::validate::ValidationError;

/// Errors surfaced by lifecycle operations.
///
/// The four kinds map one-to-one onto HTTP responses: not-found → 404,
/// validation and state-conflict → 400, store → 500 (generic message,
/// detail logged server-side). Display strings for the first three are
/// stable and returned to callers verbatim.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("List not found")]
    ListNotFound,

    #[error("Item not found")]
    ItemNotFound,

    #[error("Image not found")]
    ImageNotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Restore was called on an item that is not soft-deleted.
    #[error("Item is not deleted")]
    NotDeleted,

    /// A store reported an unexpected failure. Never shown to callers
    /// directly.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strings_are_stable() {
        assert_eq!(LifecycleError::ListNotFound.to_string(), "List not found");
        assert_eq!(LifecycleError::ItemNotFound.to_string(), "Item not found");
        assert_eq!(LifecycleError::NotDeleted.to_string(), "Item is not deleted");
        assert_eq!(LifecycleError::ImageNotFound.to_string(), "Image not found");
    }

    #[test]
    fn validation_errors_pass_through_transparently() {
        let err: LifecycleError = ValidationError::EmptyName.into();
        assert_eq!(err.to_string(), "Name must not be empty");
    }
}
