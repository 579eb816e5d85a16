//! Error types for record store operations.

use thiserror::Error;

use discog_store::StoreError;

/// Errors that can occur during record operations.
///
/// Unknown ids and taken usernames are not errors: they are reported through
/// `Option`/`bool` return values. What remains is storage failure.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The underlying slot store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A writer panicked while holding the record store's lock.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Convenience type alias for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;
