use serde::{Deserialize, Serialize};

use discog_types::Role;

use crate::error::{ServerError, ServerResult};

/// Username/password pair posted to the register and login endpoints.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Reject blank usernames and empty passwords before touching the store.
    pub fn validate(&self) -> ServerResult<()> {
        if self.username.trim().is_empty() {
            return Err(ServerError::BadRequest("username must not be empty".into()));
        }
        if self.password.is_empty() {
            return Err(ServerError::BadRequest("password must not be empty".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Who a successful register or login resolved to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self { username: username.into(), role }
    }
}
