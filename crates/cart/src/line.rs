//! Cart line and catalog product types.

use burvon_core::{CategoryId, LineId, Price, ProductId, canonicalize_category};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::persistence::Rehydrate;

/// Catalog product as supplied by the catalog service at an add-to-cart call.
///
/// `stock` is the product-level figure; callers that have loaded
/// size-specific stock pass it separately to [`CartStore::add`].
///
/// [`CartStore::add`]: crate::CartStore::add
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    /// Formatted price including currency prefix (e.g. `"₱1,299.00"`).
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    /// Free-form catalog category label.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub stock: u32,
}

/// One purchasable product+size configuration in the cart.
///
/// Display fields are a snapshot taken when the line was created; they are
/// not refreshed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Composite key, see [`LineId::compose`].
    pub id: LineId,
    pub product_id: ProductId,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
    /// Always `0 < quantity <= stock` while the line is in a store.
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    /// Canonical category (see [`burvon_core::Category`]).
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Units available for this exact product+size when last set.
    pub stock: u32,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Build a fresh line from a catalog product.
    #[must_use]
    pub fn from_product(
        product: &ProductSnapshot,
        size: Option<&str>,
        quantity: u32,
        stock: u32,
    ) -> Self {
        Self {
            id: LineId::compose(&product.id, size),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            quantity,
            size: size.map(str::to_owned),
            variant: product.variant.clone(),
            collection: product.collection.clone(),
            category: canonicalize_category(&product.category),
            category_id: product.category_id.clone(),
            stock,
            added_at: Utc::now(),
        }
    }

    /// Parsed unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        Price::parse(&self.price).times(self.quantity).amount
    }

    /// Whether the line has reached `cap` units.
    #[must_use]
    pub const fn is_at_cap(&self, cap: u32) -> bool {
        self.quantity >= cap
    }
}

impl Rehydrate for CartLine {
    type Key = LineId;

    fn identity(&self) -> LineId {
        self.id.clone()
    }

    /// Re-canonicalize the category and restore `0 < quantity <= stock`.
    fn heal(&mut self) -> bool {
        self.category = canonicalize_category(&self.category);
        self.quantity = self.quantity.min(self.stock);
        self.quantity > 0
    }
}
