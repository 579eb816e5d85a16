//! HTTP server for the Discog catalog.
//!
//! Exposes the album and user stores as JSON endpoints. Page rendering,
//! sessions and flash messages belong to whatever client sits in front of
//! this API.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use auth::{Credentials, Identity};
pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::{ServerError, ServerResult};
pub use server::CatalogServer;
