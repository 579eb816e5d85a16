//! The [`SlotBackend`] trait defining raw slot storage.
//!
//! A backend moves bytes in and out of named slots and knows nothing about
//! their contents. Parsing, defaults and pretty-printing live one level up
//! in [`FileStore`](crate::FileStore).

use crate::error::StoreResult;
use crate::slot::Slot;

/// Storage backend for slot documents.
///
/// Implementations must be thread-safe (`Send + Sync`). A write replaces the
/// whole slot; there are no partial updates.
pub trait SlotBackend: Send + Sync {
    /// Read the raw bytes of a slot.
    ///
    /// Returns `Ok(None)` if the slot has never been written. Any other
    /// failure to read is an error.
    fn read(&self, slot: &Slot) -> StoreResult<Option<Vec<u8>>>;

    /// Replace the contents of a slot.
    fn write(&self, slot: &Slot, data: &[u8]) -> StoreResult<()>;
}
