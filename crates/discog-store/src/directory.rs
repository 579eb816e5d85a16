use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::slot::Slot;
use crate::traits::SlotBackend;

/// Slot backend that keeps one file per slot inside a data directory.
///
/// The directory is created on the first write. Each write goes to a
/// temporary file in the same directory which is then renamed over the slot
/// file, so readers see either the old document or the new one.
#[derive(Clone, Debug)]
pub struct DirectoryBackend {
    root: PathBuf,
}

impl DirectoryBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing `slot`.
    pub fn path_of(&self, slot: &Slot) -> PathBuf {
        self.root.join(slot.name())
    }
}

impl SlotBackend for DirectoryBackend {
    fn read(&self, slot: &Slot) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path_of(slot)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, slot: &Slot, data: &[u8]) -> StoreResult<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_of(slot);

        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %path.display(), len = data.len(), "slot file replaced");
        Ok(())
    }
}
