use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Usernames are the identity of a user; there is no separate id.
pub type Username = String;

/// Access role attached to a user record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential and role stored under a username in the users slot.
///
/// `password` holds whatever the configured password scheme produced. With
/// the default scheme that is the plaintext password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password: String,
    pub role: Role,
    /// Keys this crate does not know, written back as found.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// A regular account, as created by registration.
    pub fn user(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            role: Role::User,
            extra: Map::new(),
        }
    }

    /// An administrator account.
    pub fn admin(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            role: Role::Admin,
            extra: Map::new(),
        }
    }
}
