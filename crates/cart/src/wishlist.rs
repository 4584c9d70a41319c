//! Wishlist store: a persisted set of saved products.
//!
//! Entries are keyed by product id only (no size axis) and carry no quantity
//! or stock. Persistence follows the cart: hydrate once, then flush after
//! every change.

use burvon_core::{ProductId, canonicalize_category};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::line::ProductSnapshot;
use crate::persistence::{PersistenceAdapter, Rehydrate};
use crate::storage::KeyValueStore;

/// A saved product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// The product id.
    pub id: ProductId,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl From<&ProductSnapshot> for WishlistItem {
    fn from(product: &ProductSnapshot) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            category: canonicalize_category(&product.category),
            collection: product.collection.clone(),
            added_at: Utc::now(),
        }
    }
}

impl Rehydrate for WishlistItem {
    type Key = ProductId;

    fn identity(&self) -> ProductId {
        self.id.clone()
    }

    fn heal(&mut self) -> bool {
        self.category = canonicalize_category(&self.category);
        true
    }
}

/// Ordered, de-duplicated wishlist.
#[derive(Debug)]
pub struct WishlistStore<S> {
    items: Vec<WishlistItem>,
    persistence: PersistenceAdapter<S, WishlistItem>,
    revision: watch::Sender<u64>,
}

impl<S: KeyValueStore> WishlistStore<S> {
    /// Create an empty, un-hydrated wishlist persisting under `key`.
    #[must_use]
    pub fn new(store: S, key: impl Into<String>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            items: Vec::new(),
            persistence: PersistenceAdapter::new(store, key),
            revision,
        }
    }

    /// Replace in-memory state with the persisted wishlist.
    pub fn init(&mut self) {
        self.items = self.persistence.load();
        info!(
            key = self.persistence.key(),
            items = self.items.len(),
            "Wishlist hydrated"
        );
        self.signal();
    }

    /// Flush state.
    pub fn dispose(&mut self) {
        self.persistence.save(&self.items);
    }

    /// Save `item` unless its product is already present.
    ///
    /// Returns whether it was inserted.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub fn add(&mut self, mut item: WishlistItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        item.category = canonicalize_category(&item.category);
        self.items.push(item);
        debug!("Added to wishlist");
        self.commit();
        true
    }

    /// Drop a product. Returns whether it was present.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != *product_id);
        if self.items.len() == before {
            return false;
        }
        debug!("Removed from wishlist");
        self.commit();
        true
    }

    /// Add if absent, remove if present. Returns whether it is now saved.
    pub fn toggle(&mut self, item: WishlistItem) -> bool {
        if self.contains(&item.id) {
            let id = item.id;
            self.remove(&id);
            false
        } else {
            self.add(item)
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| item.id == *product_id)
    }

    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Receive a revision number after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn commit(&self) {
        self.persistence.save(&self.items);
        self.signal();
    }

    fn signal(&self) {
        self.revision
            .send_modify(|revision| *revision = revision.wrapping_add(1));
    }
}
