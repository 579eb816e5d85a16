use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::counter::SlotCounter;
use crate::error::StoreResult;
use crate::file_store::FileStore;
use crate::slot::SlotLayout;

/// Where the catalog keeps its slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub slots: SlotLayout,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            slots: SlotLayout::default(),
        }
    }
}

impl StoreConfig {
    /// File-per-slot store over `data_dir`.
    pub fn file_store(&self) -> FileStore {
        FileStore::open_dir(&self.data_dir)
    }

    /// Durable id counter in the configured counter slot of `files`.
    pub fn counter(&self, files: &FileStore) -> StoreResult<SlotCounter> {
        Ok(SlotCounter::new(files.clone(), self.slots.counter_slot()?))
    }
}
