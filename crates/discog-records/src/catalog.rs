use std::sync::Arc;

use discog_store::{FileStore, IdAllocator, InMemoryIdAllocator, SlotLayout, StoreConfig};

use crate::albums::AlbumStore;
use crate::error::Result;
use crate::traits::{AlbumRepository, UserRepository};
use crate::users::UserStore;

/// The album and user repositories a front end works with.
///
/// Cloning is cheap; clones share the same stores.
#[derive(Clone)]
pub struct Catalog {
    albums: Arc<dyn AlbumRepository>,
    users: Arc<dyn UserRepository>,
}

impl Catalog {
    pub fn new(albums: Arc<dyn AlbumRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { albums, users }
    }

    /// Open the catalog kept in the configured data directory, with ids
    /// from the durable counter slot.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let files = config.file_store();
        let ids = Arc::new(config.counter(&files)?);
        Self::assemble(files, &config.slots, ids)
    }

    /// Catalog over an in-memory backend with the default layout. Nothing
    /// outlives the process.
    pub fn in_memory() -> Result<Self> {
        let ids = Arc::new(InMemoryIdAllocator::new());
        Self::assemble(FileStore::in_memory(), &SlotLayout::default(), ids)
    }

    fn assemble(
        files: FileStore,
        layout: &SlotLayout,
        ids: Arc<dyn IdAllocator>,
    ) -> Result<Self> {
        let albums = AlbumStore::new(files.clone(), layout.albums_slot()?, ids);
        let users = UserStore::new(files, layout.users_slot()?);
        Ok(Self::new(Arc::new(albums), Arc::new(users)))
    }

    pub fn albums(&self) -> &dyn AlbumRepository {
        self.albums.as_ref()
    }

    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").finish_non_exhaustive()
    }
}
