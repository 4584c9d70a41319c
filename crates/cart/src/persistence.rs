//! Persistence adapter: JSON collections over a [`KeyValueStore`].
//!
//! Loading never fails. A missing key or a document that is not a JSON
//! array yields an empty collection. Entries are decoded one at a time, so an
//! entry with the wrong shape is dropped on its own without taking its
//! neighbours with it. Every decoded item is passed through
//! [`Rehydrate::heal`] and the healed collection is written back straight
//! away, so data written by older builds (e.g. non-canonical categories) is
//! repaired on first read.
//!
//! An empty collection is stored by removing its key.
//!
//! Saves are suppressed until the first [`PersistenceAdapter::load`] has run,
//! otherwise a store constructed with an empty collection would clobber the
//! persisted one before hydration.

use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, StorageError};
use crate::storage::KeyValueStore;

/// An item type that can be repaired when loaded from storage.
pub trait Rehydrate: Serialize + DeserializeOwned {
    /// Identity used to drop duplicate entries (first occurrence wins).
    type Key: Eq + Hash;

    /// Identity of this item.
    fn identity(&self) -> Self::Key;

    /// Repair the item in place. Returns `false` if it cannot be made valid
    /// and must be dropped.
    fn heal(&mut self) -> bool;
}

/// Reads and writes one collection under one key.
#[derive(Debug)]
pub struct PersistenceAdapter<S, T> {
    store: S,
    key: String,
    hydrated: bool,
    _item: PhantomData<fn() -> T>,
}

impl<S, T> PersistenceAdapter<S, T>
where
    S: KeyValueStore,
    T: Rehydrate,
{
    /// Create an adapter for `key`. Nothing is read until [`load`](Self::load).
    #[must_use]
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            hydrated: false,
            _item: PhantomData,
        }
    }

    /// The namespaced key this adapter owns.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load, heal and write back the persisted collection.
    pub fn load(&mut self) -> Vec<T> {
        self.hydrated = true;

        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No persisted state");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read persisted state");
                return Vec::new();
            }
        };

        let entries: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding corrupt persisted state");
                return Vec::new();
            }
        };

        let total = entries.len();
        let mut seen = HashSet::with_capacity(total);
        let healed: Vec<T> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match decode_entry::<T>(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(key = %self.key, index, error = %e, "Skipping unreadable persisted entry");
                    None
                }
            })
            .filter_map(|mut item: T| item.heal().then_some(item))
            .filter(|item| seen.insert(item.identity()))
            .collect();

        if healed.len() != total {
            warn!(
                key = %self.key,
                dropped = total - healed.len(),
                "Dropped invalid or duplicate persisted entries"
            );
        }

        self.save(&healed);
        debug!(key = %self.key, count = healed.len(), "Hydrated persisted state");
        healed
    }

    /// Serialize and write `items`, or remove the key when there are none.
    /// A no-op before the first load.
    pub fn save(&self, items: &[T]) {
        if !self.hydrated {
            debug!(key = %self.key, "Skipping save before hydration");
            return;
        }

        let written = if items.is_empty() {
            self.store.remove(&self.key)
        } else {
            serde_json::to_string(items)
                .map_err(StorageError::from)
                .and_then(|encoded| self.store.set(&self.key, &encoded))
        };

        if let Err(e) = written {
            warn!(key = %self.key, error = %e, "Failed to persist state");
        }
    }
}

fn decode_entry<T: DeserializeOwned>(entry: Value) -> Result<T> {
    Ok(serde_json::from_value(entry)?)
}
