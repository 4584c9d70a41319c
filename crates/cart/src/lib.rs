//! Burvon Cart - client-side cart, wishlist and checkout-selection engine.
//!
//! The engine keeps cart lines consistent with catalog stock, merges lines
//! when a product's size changes, tracks which lines are selected for a
//! partial checkout and persists everything to a key-value store.
//!
//! # Architecture
//!
//! - Exactly one logical writer; every store API takes `&mut self` and no
//!   locks are involved.
//! - Mutations never fail. Stock violations clamp, unknown ids are no-ops,
//!   and the returned [`CartOutcome`] reports what happened.
//! - Each mutation ends with a synchronous save and a change signal.
//! - The only asynchronous piece is the add-notification dismiss timer.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`storage`] - Key-value backends (memory, filesystem)
//! - [`persistence`] - JSON load/heal/save over a backend
//! - [`store`] - Cart lines and the stock-bound merge rules
//! - [`selection`] - Checkout selection and hand-off
//! - [`notification`] - "Item added" notification with auto-dismiss
//! - [`wishlist`] - Saved products
//! - [`engine`] - Context owning cart + wishlist with init/dispose lifecycle

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod engine;
pub mod error;
pub mod line;
pub mod notification;
pub mod persistence;
pub mod selection;
pub mod storage;
pub mod store;
pub mod wishlist;

pub use config::{CartConfig, ConfigError};
pub use engine::CartEngine;
pub use error::StorageError;
pub use line::{CartLine, ProductSnapshot};
pub use notification::{Notification, Notifier};
pub use selection::{CheckoutHandoff, Selection};
pub use storage::{FsStore, KeyValueStore, MemoryStore};
pub use store::{CartOutcome, CartStore, Refusal};
pub use wishlist::{WishlistItem, WishlistStore};
