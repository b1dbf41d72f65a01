//! Storage adapters for lostbox.
//!
//! Two independent stores back the system:
//!
//! - the **record store** ([`RecordStore`]) persists the relational rows
//!   (lists and items) and offers one atomic multi-row primitive, the
//!   list cascade delete;
//! - the **object store** ([`ObjectStore`]) holds opaque image blobs
//!   addressed by [`BlobKey`](lostbox_types::BlobKey), with optional
//!   content-type metadata.
//!
//! # Backends
//!
//! - [`InMemoryRecordStore`] / [`InMemoryObjectStore`] — `RwLock`-guarded
//!   maps for tests, local development, and embedding. The record store
//!   keeps both tables behind a single lock so the cascade delete is
//!   trivially all-or-nothing.
//! - [`RetryRecordStore`] — a decorator adding bounded retry with
//!   increasing delay on transient backend failures. A no-op for the
//!   in-memory backend; intended for flaky remote drivers in development.
//!
//! # Design Rules
//!
//! 1. The stores never interpret payloads or enforce lifecycle rules;
//!    those live in `lostbox-core`.
//! 2. Reads of missing rows/blobs return `Ok(None)`, never an error.
//! 3. Deletes report whether the target existed (`Ok(bool)`).
//! 4. All backend failures are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod object;
pub mod retry;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryObjectStore, InMemoryRecordStore};
pub use object::StoredBlob;
pub use retry::{RetryPolicy, RetryRecordStore};
pub use traits::{ObjectStore, RecordStore};
