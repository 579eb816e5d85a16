use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TypeError;

/// Identifier of an album in the catalog.
///
/// Ids are issued by the store's allocator starting at 1 and are never
/// reused, so `0` never names a stored album. On disk an `AlbumId` is a
/// plain JSON integer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AlbumId(pub u64);

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlbumId {
    type Err = TypeError;

    /// Parse a user-supplied id, e.g. a CLI argument.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s
            .trim()
            .parse()
            .map_err(|_| TypeError::InvalidAlbumId(s.to_string()))?;
        if raw == 0 {
            return Err(TypeError::ZeroAlbumId);
        }
        Ok(Self(raw))
    }
}

/// The editable fields of an album.
///
/// `release_date` is kept as the caller wrote it; the catalog never parses
/// or normalizes dates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumFields {
    pub title: String,
    pub description: String,
    pub release_date: String,
}

impl AlbumFields {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        release_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            release_date: release_date.into(),
        }
    }
}

/// A catalog entry as stored in the albums slot.
///
/// Keys other than the four known fields are kept in `extra` and written
/// back unchanged, so data added by other tools survives a rewrite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub description: String,
    pub release_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Album {
    /// Build an album from a freshly allocated id and its fields.
    pub fn new(id: AlbumId, fields: AlbumFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            release_date: fields.release_date,
            extra: Map::new(),
        }
    }

    /// Replace every editable field. The id and extra keys are left
    /// untouched.
    pub fn apply(&mut self, fields: AlbumFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.release_date = fields.release_date;
    }

    /// Copy out the editable fields.
    pub fn fields(&self) -> AlbumFields {
        AlbumFields {
            title: self.title.clone(),
            description: self.description.clone(),
            release_date: self.release_date.clone(),
        }
    }
}
