//! Integration tests for the Burvon cart engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p burvon-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end cart, selection and checkout flows
//! - `persistence` - Hydration, healing and corrupt-state recovery
//! - `invariants` - Property tests over random operation sequences
//!
//! This library holds the shared fixtures.

use burvon_cart::{CartConfig, CartEngine, CartStore, MemoryStore, ProductSnapshot};
use burvon_core::{CategoryId, ProductId};

/// A catalog product with a fixed `₱1,000.00` price.
#[must_use]
pub fn product(id: &str, stock: u32) -> ProductSnapshot {
    ProductSnapshot {
        id: ProductId::new(id),
        name: format!("Burvon {id}"),
        price: "₱1,000.00".to_string(),
        image: format!("https://cdn.burvon.ph/{id}.jpg"),
        variant: None,
        collection: Some("Heritage".to_string()),
        category: "Signet Ring Collection".to_string(),
        category_id: Some(CategoryId::new("rings")),
        stock,
    }
}

/// A hydrated cart over a fresh in-memory backend.
#[must_use]
pub fn hydrated_cart(backend: &MemoryStore) -> CartStore<MemoryStore> {
    let mut cart = CartStore::new(backend.clone(), &CartConfig::default());
    cart.init();
    cart
}

/// A hydrated engine over `backend`.
#[must_use]
pub fn hydrated_engine(backend: &MemoryStore) -> CartEngine<MemoryStore> {
    let mut engine = CartEngine::new(backend.clone(), CartConfig::default());
    engine.init();
    engine
}
