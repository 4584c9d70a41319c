//! Engine context owning the cart and wishlist.
//!
//! Consumers receive an explicitly constructed [`CartEngine`] instead of
//! reaching for process-wide state. The lifecycle is:
//!
//! 1. [`CartEngine::new`] / [`CartEngine::open`] - build stores, nothing read
//! 2. [`CartEngine::init`] - hydrate both stores from persistence
//! 3. mutate through [`CartEngine::cart_mut`] / [`CartEngine::wishlist_mut`]
//! 4. [`CartEngine::dispose`] - flush and dismiss pending notifications

use tracing::info;

use crate::config::CartConfig;
use crate::storage::{FsStore, KeyValueStore};
use crate::store::CartStore;
use crate::wishlist::WishlistStore;

/// Cart + wishlist sharing one key-value backend.
#[derive(Debug)]
pub struct CartEngine<S> {
    config: CartConfig,
    cart: CartStore<S>,
    wishlist: WishlistStore<S>,
}

impl<S: KeyValueStore + Clone> CartEngine<S> {
    /// Create an engine over `store`. Call [`init`](Self::init) next.
    #[must_use]
    pub fn new(store: S, config: CartConfig) -> Self {
        let cart = CartStore::new(store.clone(), &config);
        let wishlist = WishlistStore::new(store, config.wishlist_key());
        Self {
            config,
            cart,
            wishlist,
        }
    }
}

impl CartEngine<FsStore> {
    /// Engine persisting to `config.storage_dir` on disk.
    #[must_use]
    pub fn open(config: CartConfig) -> Self {
        let store = FsStore::new(&config.storage_dir);
        info!(root = %store.root().display(), "Opening filesystem store");
        Self::new(store, config)
    }
}

impl<S: KeyValueStore> CartEngine<S> {
    /// Hydrate cart and wishlist from persistence.
    pub fn init(&mut self) {
        self.cart.init();
        self.wishlist.init();
        info!(namespace = %self.config.namespace, "Cart engine initialized");
    }

    /// Flush both stores and dismiss any pending notification.
    pub fn dispose(&mut self) {
        self.cart.dispose();
        self.wishlist.dispose();
        info!(namespace = %self.config.namespace, "Cart engine disposed");
    }

    #[must_use]
    pub const fn config(&self) -> &CartConfig {
        &self.config
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore<S> {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore<S> {
        &mut self.wishlist
    }
}
