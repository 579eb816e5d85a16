//! Process-wide id allocation.
//!
//! Every catalog record that needs an integer id takes it from one
//! [`IdAllocator`]. The counter is global rather than per record type, so if
//! a second record type ever shares the allocator its ids interleave with
//! album ids.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::file_store::FileStore;
use crate::slot::Slot;

/// Source of unique, strictly increasing ids.
pub trait IdAllocator: Send + Sync {
    /// Issue the next id. The first id from a fresh allocator is 1.
    fn next_id(&self) -> StoreResult<u64>;
}

/// On-disk shape of the counter slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct CounterDocument {
    last_id: u64,
}

/// Durable counter kept in its own slot as `{"last_id": n}`.
///
/// The high-water mark is written back after every allocation. The
/// read-increment-write sequence runs under a mutex, so callers sharing one
/// `SlotCounter` never receive the same id. Separate processes writing the
/// same slot are not coordinated.
///
/// A missing or corrupt counter slot reads as `last_id = 0`.
pub struct SlotCounter {
    files: FileStore,
    slot: Slot,
    lock: Mutex<()>,
}

impl SlotCounter {
    pub fn new(files: FileStore, slot: Slot) -> Self {
        Self {
            files,
            slot,
            lock: Mutex::new(()),
        }
    }
}

impl IdAllocator for SlotCounter {
    fn next_id(&self) -> StoreResult<u64> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;

        let last_id = self
            .files
            .load(&self.slot, CounterDocument::default())?
            .last_id;
        let next = last_id
            .checked_add(1)
            .ok_or(StoreError::CounterExhausted { last_id })?;
        self.files
            .save(&self.slot, &CounterDocument { last_id: next })?;

        debug!(slot = %self.slot, id = next, "allocated id");
        Ok(next)
    }
}

impl std::fmt::Debug for SlotCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotCounter")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// Non-durable allocator, used by in-memory catalogs.
#[derive(Debug, Default)]
pub struct InMemoryIdAllocator {
    last: AtomicU64,
}

impl InMemoryIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for InMemoryIdAllocator {
    fn next_id(&self) -> StoreResult<u64> {
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|previous| previous + 1)
            .map_err(|last_id| StoreError::CounterExhausted { last_id })
    }
}
