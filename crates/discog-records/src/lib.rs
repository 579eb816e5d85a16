//! Album and user record stores for the Discog catalog.
//!
//! This crate implements the catalog's two collections on top of
//! `discog-store` slots:
//!
//! - **Albums** are an ordered list keyed by allocator-issued ids. They can
//!   be listed, fetched, added, edited and deleted.
//! - **Users** are a mapping from username to credential and role. They can
//!   only be registered and authenticated. A fresh catalog contains a single
//!   administrator account.
//!
//! Unknown ids and taken usernames are ordinary outcomes (`None`/`false`),
//! not errors; only storage failures produce a [`RecordError`].
//!
//! # Modules
//!
//! - [`error`] — Error types for record operations
//! - [`traits`] — The [`AlbumRepository`] and [`UserRepository`] traits
//! - [`albums`] — Slot-backed [`AlbumStore`]
//! - [`users`] — Slot-backed [`UserStore`]
//! - [`password`] — The [`PasswordScheme`] seam and [`Plaintext`] scheme
//! - [`catalog`] — [`Catalog`], both repositories wired over one store

pub mod albums;
pub mod catalog;
pub mod error;
pub mod password;
pub mod traits;
pub mod users;

pub use albums::AlbumStore;
pub use catalog::Catalog;
pub use error::{RecordError, Result};
pub use password::{PasswordScheme, Plaintext};
pub use traits::{AlbumRepository, UserRepository};
pub use users::{UserStore, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
