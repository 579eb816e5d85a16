use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid album id: {0:?}")]
    InvalidAlbumId(String),

    #[error("album id must be non-zero")]
    ZeroAlbumId,
}
