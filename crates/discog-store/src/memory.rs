use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::slot::Slot;
use crate::traits::SlotBackend;

/// In-memory, HashMap-based slot backend.
///
/// Intended for tests and embedding. Slot contents are held behind a
/// `RwLock` and cloned on read/write. Data is lost when the backend is
/// dropped.
pub struct InMemoryBackend {
    slots: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    fn slot_count(&self) -> usize {
        self.slots.read().map(|m| m.len()).unwrap_or(0)
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotBackend for InMemoryBackend {
    fn read(&self, slot: &Slot) -> StoreResult<Option<Vec<u8>>> {
        let slots = self
            .slots
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(slots.get(slot.name()).cloned())
    }

    fn write(&self, slot: &Slot, data: &[u8]) -> StoreResult<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        slots.insert(slot.name().to_string(), data.to_vec());
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("slot_count", &self.slot_count())
            .finish()
    }
}
