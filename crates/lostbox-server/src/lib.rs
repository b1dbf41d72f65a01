//! HTTP server for lostbox.
//!
//! Exposes the list/item lifecycle over a REST API under `/api`:
//! list CRUD, multipart item registration with image upload, soft
//! delete / restore, and raw image serving with long-lived cache
//! headers. All lifecycle and consistency rules live in
//! `lostbox-core`; this crate only maps HTTP on and off the service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use server::LostboxServer;
