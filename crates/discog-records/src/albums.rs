//! Album store over a single JSON document.
//!
//! [`AlbumStore`] keeps every album in one slot as an ordered JSON array and
//! rewrites the whole array on each change. Ids come from a shared
//! [`IdAllocator`]. Array entries that do not parse as an album are skipped
//! on load, so they are dropped by the next write; every valid album is
//! kept.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use discog_store::{FileStore, IdAllocator, Slot};
use discog_types::{Album, AlbumFields, AlbumId};

use crate::error::{RecordError, Result};
use crate::traits::AlbumRepository;

/// Slot-backed implementation of [`AlbumRepository`].
///
/// Writes (`add`, `update`, `delete`) are serialized by an internal mutex so
/// that concurrent callers sharing one store do not lose each other's
/// changes. Reads take no lock.
pub struct AlbumStore {
    files: FileStore,
    slot: Slot,
    ids: Arc<dyn IdAllocator>,
    write_lock: Mutex<()>,
}

impl AlbumStore {
    pub fn new(files: FileStore, slot: Slot, ids: Arc<dyn IdAllocator>) -> Self {
        Self {
            files,
            slot,
            ids,
            write_lock: Mutex::new(()),
        }
    }

    fn load_all(&self) -> Result<Vec<Album>> {
        Ok(self.files.load_list(&self.slot)?)
    }

    fn save_all(&self, albums: &[Album]) -> Result<()> {
        Ok(self.files.save(&self.slot, albums)?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|e| RecordError::LockPoisoned(e.to_string()))
    }

    /// Next allocator id not already present in `albums`.
    ///
    /// Ids only collide if the counter slot was lost or rolled back; such ids
    /// are burned rather than handed out twice.
    fn allocate_unused(&self, albums: &[Album]) -> Result<AlbumId> {
        loop {
            let id = AlbumId(self.ids.next_id()?);
            if !albums.iter().any(|album| album.id == id) {
                return Ok(id);
            }
            warn!(slot = %self.slot, id = %id, "allocator issued an id already in use, skipping");
        }
    }
}

impl AlbumRepository for AlbumStore {
    fn list(&self) -> Result<Vec<Album>> {
        self.load_all()
    }

    fn get(&self, id: AlbumId) -> Result<Option<Album>> {
        Ok(self.load_all()?.into_iter().find(|album| album.id == id))
    }

    fn add(&self, fields: AlbumFields) -> Result<Album> {
        let _guard = self.lock()?;
        let mut albums = self.load_all()?;

        let id = self.allocate_unused(&albums)?;
        let album = Album::new(id, fields);
        albums.push(album.clone());
        self.save_all(&albums)?;

        debug!(id = %album.id, count = albums.len(), "album added");
        Ok(album)
    }

    fn update(&self, id: AlbumId, fields: AlbumFields) -> Result<Option<Album>> {
        let _guard = self.lock()?;
        let mut albums = self.load_all()?;

        let Some(album) = albums.iter_mut().find(|album| album.id == id) else {
            debug!(id = %id, "update of unknown album ignored");
            return Ok(None);
        };
        album.apply(fields);
        let updated = album.clone();
        self.save_all(&albums)?;

        debug!(id = %id, "album updated");
        Ok(Some(updated))
    }

    fn delete(&self, id: AlbumId) -> Result<bool> {
        let _guard = self.lock()?;
        let mut albums = self.load_all()?;

        let before = albums.len();
        albums.retain(|album| album.id != id);
        if albums.len() == before {
            debug!(id = %id, "delete of unknown album ignored");
            return Ok(false);
        }
        self.save_all(&albums)?;

        debug!(id = %id, removed = before - albums.len(), "album deleted");
        Ok(true)
    }
}

impl std::fmt::Debug for AlbumStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlbumStore")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discog_store::{InMemoryBackend, InMemoryIdAllocator, SlotBackend, SlotCounter};

    fn albums_slot() -> Slot {
        Slot::new("albums.json").unwrap()
    }

    fn counter_slot() -> Slot {
        Slot::new("id.json").unwrap()
    }

    /// Store plus a handle on its backing files.
    fn store_with_files() -> (FileStore, AlbumStore) {
        let files = FileStore::in_memory();
        let ids = Arc::new(SlotCounter::new(files.clone(), counter_slot()));
        let store = AlbumStore::new(files.clone(), albums_slot(), ids);
        (files, store)
    }

    fn store() -> AlbumStore {
        store_with_files().1
    }

    fn fields(title: &str) -> AlbumFields {
        AlbumFields::new(title, format!("{title} description"), "2020-01-01")
    }

    // -----------------------------------------------------------------------
    // Add / get
    // -----------------------------------------------------------------------

    #[test]
    fn add_then_get_returns_same_fields() {
        let store = store();
        let added = store.add(AlbumFields::new("T", "D", "2020-01-01")).unwrap();
        assert_eq!(added.id, AlbumId(1));

        let fetched = store.get(added.id).unwrap().expect("album should exist");
        assert_eq!(fetched.id, added.id);
        assert_eq!(fetched.title, "T");
        assert_eq!(fetched.description, "D");
        assert_eq!(fetched.release_date, "2020-01-01");
    }

    #[test]
    fn ids_increase_with_each_add() {
        let store = store();
        let ids: Vec<AlbumId> = ["a", "b", "c"]
            .iter()
            .map(|t| store.add(fields(t)).unwrap().id)
            .collect();
        assert_eq!(ids, vec![AlbumId(1), AlbumId(2), AlbumId(3)]);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = store();
        store.add(fields("a")).unwrap();
        assert!(store.get(AlbumId(99)).unwrap().is_none());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = store();
        assert!(store.list().unwrap().is_empty());
        store.add(fields("zeta")).unwrap();
        store.add(fields("alpha")).unwrap();
        store.add(fields("mu")).unwrap();

        let titles: Vec<String> = store.list().unwrap().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["zeta", "alpha", "mu"]);
    }

    #[test]
    fn add_persists_counter_and_albums() {
        let (files, store) = store_with_files();
        store.add(fields("a")).unwrap();
        store.add(fields("b")).unwrap();

        let counter: serde_json::Value =
            files.load(&counter_slot(), serde_json::Value::Null).unwrap();
        assert_eq!(counter, serde_json::json!({"last_id": 2}));
        let stored: Vec<Album> = files.load_list(&albums_slot()).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = store();
        let first = store.add(fields("a")).unwrap();
        let second = store.add(fields("b")).unwrap();
        assert!(store.delete(second.id).unwrap());
        let third = store.add(fields("c")).unwrap();
        assert_eq!(first.id, AlbumId(1));
        assert_eq!(third.id, AlbumId(3));
    }

    #[test]
    fn add_skips_ids_already_in_collection() {
        let files = FileStore::in_memory();
        let existing = vec![
            Album::new(AlbumId(1), fields("old")),
            Album::new(AlbumId(2), fields("older")),
        ];
        files.save(&albums_slot(), &existing).unwrap();
        // Counter slot lost: the allocator restarts at 1.
        let store = AlbumStore::new(files, albums_slot(), Arc::new(InMemoryIdAllocator::new()));
        let added = store.add(fields("new")).unwrap();
        assert_eq!(added.id, AlbumId(3));
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn update_writes_caller_fields() {
        let store = store();
        let album = store.add(fields("before")).unwrap();

        let updated = store
            .update(album.id, AlbumFields::new("after", "new text", "1999-12-31"))
            .unwrap()
            .expect("album should exist");
        assert_eq!(updated.id, album.id);
        assert_eq!(updated.title, "after");

        let fetched = store.get(album.id).unwrap().unwrap();
        assert_eq!(fetched, updated);
        assert_eq!(fetched.description, "new text");
        assert_eq!(fetched.release_date, "1999-12-31");
    }

    #[test]
    fn update_leaves_other_albums_untouched() {
        let store = store();
        let a = store.add(fields("a")).unwrap();
        let b = store.add(fields("b")).unwrap();
        store.update(a.id, fields("a2")).unwrap();

        assert_eq!(store.get(b.id).unwrap().unwrap(), b);
        let titles: Vec<String> = store.list().unwrap().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["a2", "b"]);
    }

    #[test]
    fn update_unknown_id_writes_nothing() {
        let (files, store) = store_with_files();
        assert!(store.update(AlbumId(5), fields("x")).unwrap().is_none());
        let raw: serde_json::Value = files.load(&albums_slot(), serde_json::Value::Null).unwrap();
        assert!(raw.is_null());
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_removes_from_list() {
        let store = store();
        let a = store.add(fields("a")).unwrap();
        let b = store.add(fields("b")).unwrap();

        assert!(store.delete(a.id).unwrap());
        let remaining = store.list().unwrap();
        assert_eq!(remaining, vec![b]);
        assert!(store.get(a.id).unwrap().is_none());
    }

    #[test]
    fn delete_unknown_id_leaves_list_unchanged() {
        let store = store();
        store.add(fields("a")).unwrap();
        store.add(fields("b")).unwrap();
        let before = store.list().unwrap();

        assert!(!store.delete(AlbumId(42)).unwrap());
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn delete_removes_every_duplicate() {
        let files = FileStore::in_memory();
        let dup = Album::new(AlbumId(7), fields("dup"));
        files.save(&albums_slot(), &vec![dup.clone(), dup]).unwrap();
        let store = AlbumStore::new(files, albums_slot(), Arc::new(InMemoryIdAllocator::new()));

        assert!(store.delete(AlbumId(7)).unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Self-healing reads
    // -----------------------------------------------------------------------

    #[test]
    fn corrupt_albums_slot_reads_as_empty() {
        let backend = InMemoryBackend::new();
        backend.write(&albums_slot(), b"{{{ definitely not json").unwrap();
        let files = FileStore::new(backend);
        let store = AlbumStore::new(files, albums_slot(), Arc::new(InMemoryIdAllocator::new()));

        assert!(store.list().unwrap().is_empty());
        assert!(store.get(AlbumId(1)).unwrap().is_none());

        // The next write replaces the corrupt document.
        let added = store.add(fields("fresh")).unwrap();
        assert_eq!(store.list().unwrap(), vec![added]);
    }

    #[test]
    fn one_malformed_album_does_not_drop_the_others() {
        let backend = InMemoryBackend::new();
        backend
            .write(
                &albums_slot(),
                br#"[
                    {"id": 1, "title": "A", "description": "d", "release_date": "2001"},
                    {"id": 2, "title": "B", "description": "d"}
                ]"#,
            )
            .unwrap();
        let files = FileStore::new(backend);
        let ids = Arc::new(InMemoryIdAllocator::new());
        let store = AlbumStore::new(files.clone(), albums_slot(), ids);

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "A");

        let added = store.add(fields("C")).unwrap();
        assert_ne!(added.id, AlbumId(1));
        let titles: Vec<String> = store.list().unwrap().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn unknown_keys_survive_unrelated_writes() {
        let backend = InMemoryBackend::new();
        backend
            .write(
                &albums_slot(),
                br#"[{"id": 1, "title": "Help!", "description": "", "release_date": "1965",
                      "artist": "The Beatles"}]"#,
            )
            .unwrap();
        let files = FileStore::new(backend);
        let ids = Arc::new(SlotCounter::new(files.clone(), counter_slot()));
        let store = AlbumStore::new(files.clone(), albums_slot(), ids);

        store.add(fields("Rubber Soul")).unwrap();
        store.update(AlbumId(1), fields("Help")).unwrap();

        let raw: serde_json::Value = files.load(&albums_slot(), serde_json::Value::Null).unwrap();
        assert_eq!(raw[0]["artist"], "The Beatles");
        assert_eq!(raw[0]["title"], "Help");
        assert!(raw[1].get("artist").is_none());
    }

    #[test]
    fn reopened_store_sees_previous_albums() {
        let dir = tempfile::tempdir().unwrap();
        let open = || {
            let files = FileStore::open_dir(dir.path());
            let ids = Arc::new(SlotCounter::new(files.clone(), counter_slot()));
            AlbumStore::new(files, albums_slot(), ids)
        };

        let added = open().add(fields("kept")).unwrap();
        let reopened = open();
        assert_eq!(reopened.get(added.id).unwrap(), Some(added));
        assert_eq!(reopened.add(fields("next")).unwrap().id, AlbumId(2));
    }

    #[test]
    fn concurrent_adds_are_all_kept() {
        use std::thread;

        let store = Arc::new(store());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..10 {
                        store.add(fields(&format!("{t}-{i}"))).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }

        let mut ids: Vec<u64> = store.list().unwrap().iter().map(|a| a.id.0).collect();
        assert_eq!(ids.len(), 40);
        ids.sort_unstable();
        assert_eq!(ids, (1..=40).collect::<Vec<_>>());
    }
}
