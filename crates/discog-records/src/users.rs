//! User store over a single JSON mapping.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use discog_store::{FileStore, Slot};
use discog_types::{UserRecord, Username};

use crate::error::{RecordError, Result};
use crate::password::{PasswordScheme, Plaintext};
use crate::traits::UserRepository;

/// Name of the account present in a users slot that was never written.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Password of the seeded administrator account.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Slot-backed implementation of [`UserRepository`].
///
/// The slot holds a mapping of username to [`UserRecord`]. While the slot
/// has never been written (or is not a JSON object) the mapping reads as a
/// single administrator account, `admin` / `admin123`. The first
/// registration persists that account alongside the new user. Individual
/// entries that fail to parse are skipped.
pub struct UserStore {
    files: FileStore,
    slot: Slot,
    scheme: Arc<dyn PasswordScheme>,
    write_lock: Mutex<()>,
}

impl UserStore {
    /// User store with the [`Plaintext`] password scheme.
    pub fn new(files: FileStore, slot: Slot) -> Self {
        Self::with_scheme(files, slot, Arc::new(Plaintext))
    }

    pub fn with_scheme(files: FileStore, slot: Slot, scheme: Arc<dyn PasswordScheme>) -> Self {
        Self {
            files,
            slot,
            scheme,
            write_lock: Mutex::new(()),
        }
    }

    /// The mapping a fresh users slot reads as.
    pub fn default_users(&self) -> BTreeMap<Username, UserRecord> {
        let mut users = BTreeMap::new();
        users.insert(
            DEFAULT_ADMIN_USERNAME.to_string(),
            UserRecord::admin(self.scheme.seal(DEFAULT_ADMIN_PASSWORD)),
        );
        users
    }

    fn load_all(&self) -> Result<BTreeMap<Username, UserRecord>> {
        Ok(self
            .files
            .load_map_or_else(&self.slot, || self.default_users())?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|e| RecordError::LockPoisoned(e.to_string()))
    }
}

impl UserRepository for UserStore {
    fn register(&self, username: &str, password: &str) -> Result<bool> {
        let _guard = self.lock()?;
        let mut users = self.load_all()?;

        if users.contains_key(username) {
            debug!(username, "registration rejected, username taken");
            return Ok(false);
        }
        users.insert(
            username.to_string(),
            UserRecord::user(self.scheme.seal(password)),
        );
        self.files.save(&self.slot, &users)?;

        debug!(username, count = users.len(), "user registered");
        Ok(true)
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let users = self.load_all()?;
        let ok = users
            .get(username)
            .is_some_and(|record| self.scheme.verify(&record.password, password));
        debug!(username, ok, "authentication attempt");
        Ok(ok)
    }

    fn find(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.load_all()?.remove(username))
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
