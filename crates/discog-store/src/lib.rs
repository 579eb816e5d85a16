//! Slot-based document storage for the Discog catalog.
//!
//! The catalog keeps each collection as one JSON document in a named slot
//! (with the default backend, one file in the data directory). This crate
//! provides the load/save layer over those slots and the durable counter
//! that issues record ids.
//!
//! # Storage Backends
//!
//! All backends implement the [`SlotBackend`] trait:
//!
//! - [`DirectoryBackend`] -- one file per slot, replaced via rename on write
//! - [`InMemoryBackend`] -- `HashMap`-based backend for tests and embedding
//!
//! # Design Rules
//!
//! 1. A write replaces a whole document; there are no partial updates.
//! 2. Reads are self-healing: a missing or unparseable slot loads as the
//!    caller's default and is never reported as an error. Within a
//!    collection, records that fail to parse are skipped, not fatal.
//! 3. Backend I/O failures (permissions, full disk) are always propagated.
//! 4. Ids come from a single [`IdAllocator`] and are never reused.

pub mod config;
pub mod counter;
pub mod directory;
pub mod error;
pub mod file_store;
pub mod memory;
pub mod slot;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use config::StoreConfig;
pub use counter::{IdAllocator, InMemoryIdAllocator, SlotCounter};
pub use directory::DirectoryBackend;
pub use error::{StoreError, StoreResult};
pub use file_store::FileStore;
pub use memory::InMemoryBackend;
pub use slot::{Slot, SlotLayout};
pub use traits::SlotBackend;
