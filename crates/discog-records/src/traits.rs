//! The repository traits through which the catalog is accessed.
//!
//! Front ends (the HTTP server, the CLI) only see these traits. The shipped
//! implementations keep each collection as one JSON document, but any
//! backend honouring the same contract can be swapped in.

use discog_types::{Album, AlbumFields, AlbumId, UserRecord};

use crate::error::Result;

/// CRUD over the album collection.
///
/// Implementations must be thread-safe (`Send + Sync`). Album ids are
/// assigned by the store on [`add`](Self::add) and never change.
pub trait AlbumRepository: Send + Sync {
    /// All albums in insertion order.
    fn list(&self) -> Result<Vec<Album>>;

    /// Look up an album by id.
    ///
    /// Returns `Ok(None)` if no album has that id.
    fn get(&self, id: AlbumId) -> Result<Option<Album>>;

    /// Create an album with a freshly allocated id.
    fn add(&self, fields: AlbumFields) -> Result<Album>;

    /// Replace the editable fields of an album.
    ///
    /// Returns the updated album, or `Ok(None)` without writing anything if
    /// the id is unknown.
    fn update(&self, id: AlbumId, fields: AlbumFields) -> Result<Option<Album>>;

    /// Remove the album with this id.
    ///
    /// Returns `Ok(true)` if an album was removed, `Ok(false)` if the id was
    /// unknown.
    fn delete(&self, id: AlbumId) -> Result<bool>;
}

/// Registration and credential checks over the user mapping.
pub trait UserRepository: Send + Sync {
    /// Create a regular user.
    ///
    /// Returns `Ok(false)` and changes nothing if the username is taken.
    fn register(&self, username: &str, password: &str) -> Result<bool>;

    /// Check a username/password pair.
    ///
    /// Unknown usernames and wrong passwords both yield `Ok(false)`.
    fn authenticate(&self, username: &str, password: &str) -> Result<bool>;

    /// Look up the stored record for a username.
    fn find(&self, username: &str) -> Result<Option<UserRecord>>;
}
