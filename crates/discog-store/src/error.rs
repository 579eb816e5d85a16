/// Errors from slot storage and id allocation.
///
/// A slot that is missing or holds an unparseable document is not an error:
/// [`FileStore::load`](crate::FileStore::load) substitutes the caller's
/// default instead. What remains here are the failures a caller cannot
/// recover from by retrying with a default.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be encoded for writing.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The slot name cannot be mapped onto storage.
    #[error("invalid slot name {name:?}: {reason}")]
    InvalidSlotName { name: String, reason: String },

    /// The id counter has reached `u64::MAX`.
    #[error("id counter exhausted at {last_id}")]
    CounterExhausted { last_id: u64 },

    /// A writer panicked while holding a store lock.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
