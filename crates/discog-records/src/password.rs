//! Pluggable password handling for the user store.
//!
//! The only scheme shipped is [`Plaintext`], which stores and compares
//! passwords verbatim. It keeps existing `users.json` files readable and is
//! NOT suitable for anything beyond a local toy deployment. A hashing scheme
//! can be plugged in through [`UserStore::with_scheme`](crate::UserStore::with_scheme).

/// How passwords are stored and checked.
pub trait PasswordScheme: Send + Sync {
    /// Turn a plaintext password into the string that gets stored.
    fn seal(&self, plaintext: &str) -> String;

    /// Check a supplied password against a stored one.
    fn verify(&self, stored: &str, supplied: &str) -> bool;
}

/// Stores the password as-is and compares by exact string equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Plaintext;

impl PasswordScheme for Plaintext {
    fn seal(&self, plaintext: &str) -> String {
        plaintext.to_string()
    }

    fn verify(&self, stored: &str, supplied: &str) -> bool {
        stored == supplied
    }
}
