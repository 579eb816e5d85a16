use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::{debug, warn};

use crate::directory::DirectoryBackend;
use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryBackend;
use crate::slot::Slot;
use crate::traits::SlotBackend;

/// Whole-document JSON load/save over a [`SlotBackend`].
///
/// Reads are self-healing: a slot that was never written, or whose contents
/// are not JSON of the expected container type, loads as the caller's
/// default. Collections keep every record that parses, so one bad entry
/// never empties the whole document. Only backend I/O failures are
/// returned as errors.
///
/// `FileStore` is cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct FileStore {
    backend: Arc<dyn SlotBackend>,
}

impl FileStore {
    pub fn new(backend: impl SlotBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// File-per-slot store rooted at `dir`.
    pub fn open_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(DirectoryBackend::new(dir))
    }

    /// Store backed by an [`InMemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(InMemoryBackend::new())
    }

    /// Parse `slot` as JSON, or `None` if it is absent or not JSON at all.
    fn read_value(&self, slot: &Slot) -> StoreResult<Option<Value>> {
        let Some(data) = self.backend.read(slot)? else {
            debug!(slot = %slot, "slot absent, using default");
            return Ok(None);
        };
        match serde_json::from_slice(&data) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(slot = %slot, error = %e, "slot is not valid JSON, using default");
                Ok(None)
            }
        }
    }

    /// Load the single document in `slot`, or `default` if it is absent or
    /// does not parse as `T`.
    pub fn load<T: DeserializeOwned>(&self, slot: &Slot, default: T) -> StoreResult<T> {
        let Some(value) = self.read_value(slot)? else {
            return Ok(default);
        };
        match serde_json::from_value(value) {
            Ok(document) => Ok(document),
            Err(e) => {
                warn!(slot = %slot, error = %e, "slot has the wrong shape, using default");
                Ok(default)
            }
        }
    }

    /// Load a JSON array of records.
    ///
    /// An absent slot, invalid JSON or a top-level value that is not an
    /// array loads as empty. Entries that do not parse as `T` are skipped
    /// with a warning; the rest are returned in document order.
    pub fn load_list<T: DeserializeOwned>(&self, slot: &Slot) -> StoreResult<Vec<T>> {
        let items = match self.read_value(slot)? {
            Some(Value::Array(items)) => items,
            Some(_) => {
                warn!(slot = %slot, "slot is not a JSON array, using default");
                return Ok(Vec::new());
            }
            None => return Ok(Vec::new()),
        };
        Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(slot = %slot, index, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect())
    }

    /// Load a JSON object of records keyed by name.
    ///
    /// Falls back to `default()` when the slot is absent, not JSON, or not
    /// an object. Entries that do not parse as `T` are skipped with a
    /// warning.
    pub fn load_map_or_else<T, F>(
        &self,
        slot: &Slot,
        default: F,
    ) -> StoreResult<BTreeMap<String, T>>
    where
        T: DeserializeOwned,
        F: FnOnce() -> BTreeMap<String, T>,
    {
        let entries = match self.read_value(slot)? {
            Some(Value::Object(entries)) => entries,
            Some(_) => {
                warn!(slot = %slot, "slot is not a JSON object, using default");
                return Ok(default());
            }
            None => return Ok(default()),
        };
        Ok(entries
            .into_iter()
            .filter_map(|(key, item)| match serde_json::from_value(item) {
                Ok(record) => Some((key, record)),
                Err(e) => {
                    warn!(slot = %slot, key = %key, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect())
    }

    /// Serialize `document` and overwrite `slot` with it.
    pub fn save<T: Serialize + ?Sized>(&self, slot: &Slot, document: &T) -> StoreResult<()> {
        let data = to_pretty_json(document)?;
        self.backend.write(slot, &data)?;
        debug!(slot = %slot, len = data.len(), "slot saved");
        Ok(())
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").finish_non_exhaustive()
    }
}

/// JSON with four-space indentation, matching existing catalog files.
fn to_pretty_json<T: Serialize + ?Sized>(document: &T) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(buf)
}
