//! Foundation types for the Discog album catalog.
//!
//! This crate provides the record types shared by every other Discog crate.
//! They serialize to exactly the JSON shapes kept in the catalog's slots, so
//! a document written by one version of the store can be read by another.
//!
//! # Key Types
//!
//! - [`AlbumId`] — Allocator-issued album identifier, a JSON integer on disk
//! - [`Album`] — A catalog entry: id plus title, description and release date
//! - [`AlbumFields`] — The caller-editable part of an album
//! - [`UserRecord`] — Stored credential and [`Role`] for one username

pub mod album;
pub mod error;
pub mod user;

pub use album::{Album, AlbumFields, AlbumId};
pub use error::TypeError;
pub use user::{Role, UserRecord, Username};
