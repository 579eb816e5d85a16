//! Slot names and the catalog's slot layout.
//!
//! A slot is one named document. With the directory backend the name is a
//! file name inside the data directory, so names are restricted to a single
//! path component:
//!
//! - Must be non-empty
//! - Must not contain `/`, `\` or NUL
//! - Must not be `.` or `..`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

const FORBIDDEN_CHARS: &[char] = &['/', '\\', '\0'];

/// A validated slot name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    name: String,
}

impl Slot {
    /// Validate and wrap a slot name.
    ///
    /// ```
    /// use discog_store::Slot;
    ///
    /// assert!(Slot::new("albums.json").is_ok());
    /// assert!(Slot::new("").is_err());
    /// assert!(Slot::new("../albums.json").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(StoreError::InvalidSlotName {
                name,
                reason: "slot name must not be empty".into(),
            });
        }
        if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            return Err(StoreError::InvalidSlotName {
                reason: format!("contains forbidden character: {ch:?}"),
                name,
            });
        }
        if name == "." || name == ".." {
            return Err(StoreError::InvalidSlotName {
                name,
                reason: "must not be '.' or '..'".into(),
            });
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Names of the three catalog slots.
///
/// Defaults match the file names the catalog has always used, so an existing
/// data directory is picked up without configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotLayout {
    pub albums: String,
    pub users: String,
    pub counter: String,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            albums: "albums.json".into(),
            users: "users.json".into(),
            counter: "id.json".into(),
        }
    }
}

impl SlotLayout {
    pub fn albums_slot(&self) -> StoreResult<Slot> {
        Slot::new(self.albums.clone())
    }

    pub fn users_slot(&self) -> StoreResult<Slot> {
        Slot::new(self.users.clone())
    }

    pub fn counter_slot(&self) -> StoreResult<Slot> {
        Slot::new(self.counter.clone())
    }
}
