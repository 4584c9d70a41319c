//! Durable key-value backends.
//!
//! The engine persists whole collections as JSON strings under namespaced
//! keys. Backends only move strings; encoding is the
//! [`PersistenceAdapter`](crate::persistence::PersistenceAdapter)'s job.
//!
//! - [`MemoryStore`] - shared in-process map, used by tests and embedders
//! - [`FsStore`] - one `<key>.json` file per key under a root directory

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Storage port for raw persisted blobs, keyed by logical name.
///
/// Implementations take `&self` so that one backend handle can be cloned and
/// shared by the cart and wishlist stores.
pub trait KeyValueStore {
    /// Read the value stored under `key`. Returns `Ok(None)` if missing.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Persist `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}
