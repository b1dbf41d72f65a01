//! Foundation types for lostbox.
//!
//! This crate provides the identifier, record, and blob-key types used
//! throughout the lostbox system. Every other lostbox crate depends on
//! `lostbox-types`.
//!
//! # Key Types
//!
//! - [`ListId`] / [`ItemId`] — Opaque UUID identifiers for lists and items
//! - [`List`] / [`Item`] — The two persisted record kinds
//! - [`BlobKey`] — Validated key addressing an image blob in the object store
//! - [`TypeError`] — Parse failures for the above

pub mod blob;
pub mod error;
pub mod id;
pub mod record;

pub use blob::BlobKey;
pub use error::TypeError;
pub use id::{ItemId, ListId};
pub use record::{Item, List};
