//! Lifecycle service for lostbox.
//!
//! This crate owns the rules governing how lists and items move through
//! creation, soft-deletion, restoration, and cascading hard-deletion,
//! and the consistency invariant between item image references and
//! object-store blobs:
//!
//! - every live item with an image key has a blob under that key
//!   (blob write happens-before row insert on registration);
//! - hard-deleting a list removes all its items and all their blobs,
//!   in every soft-delete state;
//! - soft-delete and restore never touch the object store, so restore
//!   is always possible without re-upload.
//!
//! # Modules
//!
//! - [`error`] — The [`LifecycleError`] taxonomy
//! - [`validate`] — Pure input validation helpers
//! - [`service`] — The [`LifecycleService`] orchestrating both stores

pub mod error;
pub mod service;
pub mod validate;

pub use error::{LifecycleError, LifecycleResult};
pub use service::{ImageUpload, ItemFilter, LifecycleService, NewItem};
pub use validate::{
    sanitize_filename, validate_comment, validate_image_size, validate_image_type,
    validate_list_name, ValidationError, MAX_COMMENT_CHARS, MAX_IMAGE_BYTES,
};
