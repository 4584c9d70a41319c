//! Subcommand definitions and handlers.

pub mod cart;
pub mod selection;
pub mod wishlist;

use burvon_cart::{CartOutcome, ConfigError, ProductSnapshot, Refusal};
use burvon_core::{CategoryId, ProductId};
use clap::{Args, Subcommand};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Output could not be encoded.
    #[error("Output encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The referenced line or product is not present.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Catalog product fields, as the catalog service would supply them.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Catalog product id
    #[arg(long)]
    pub product_id: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Formatted price, e.g. "₱1,299.00"
    #[arg(long)]
    pub price: String,

    /// Image URL
    #[arg(long, default_value = "")]
    pub image: String,

    /// Free-form category label
    #[arg(long, default_value = "")]
    pub category: String,

    /// Catalog category id
    #[arg(long)]
    pub category_id: Option<String>,

    /// Collection name
    #[arg(long)]
    pub collection: Option<String>,

    /// Variant label
    #[arg(long)]
    pub variant: Option<String>,
}

impl ProductArgs {
    /// Catalog snapshot with product-level `stock`.
    #[must_use]
    pub fn into_snapshot(self, stock: u32) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(self.product_id),
            name: self.name,
            price: self.price,
            image: self.image,
            variant: self.variant,
            collection: self.collection,
            category: self.category,
            category_id: self.category_id.map(CategoryId::new),
            stock,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Add units of a product
    Add {
        #[command(flatten)]
        product: ProductArgs,

        /// Product-level stock
        #[arg(long)]
        stock: u32,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Size; omitted means "default"
        #[arg(short, long)]
        size: Option<String>,

        /// Stock for this exact size, overriding --stock
        #[arg(long)]
        size_stock: Option<u32>,
    },
    /// Remove a line
    Remove {
        /// Line id, e.g. `P1_M`
        id: String,
    },
    /// Set a line's quantity (0 removes it)
    Qty {
        id: String,
        quantity: u32,

        /// Current stock limit for the line
        #[arg(long)]
        stock: Option<u32>,
    },
    /// Change a line's size
    Size {
        id: String,
        size: String,

        /// Stock for the new size
        #[arg(long)]
        stock: Option<u32>,
    },
    /// List lines as JSON
    List,
    /// Print item count and total
    Total,
    /// Remove every line
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum SelectAction {
    /// Flip selection of a line
    Toggle { id: String },
    /// Select every line
    All,
    /// Clear the selection
    #[command(name = "none")]
    Clear,
    /// List selected lines as JSON
    List,
}

#[derive(Debug, Subcommand)]
pub enum WishlistAction {
    /// Save a product
    Add {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Remove a product
    Remove { product_id: String },
    /// Save if absent, remove if present
    Toggle {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// List saved products as JSON
    List,
}

/// Write a JSON document to stdout.
#[allow(clippy::print_stdout)]
pub fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write a line of text to stdout.
#[allow(clippy::print_stdout)]
pub fn print_line(text: &str) {
    println!("{text}");
}

/// Human summary of a cart mutation.
#[must_use]
pub fn describe(outcome: &CartOutcome) -> String {
    match outcome {
        CartOutcome::Added { line, clamped } => format!(
            "added {} x{}{}",
            line.id,
            line.quantity,
            clamp_note(*clamped, line.stock)
        ),
        CartOutcome::Updated { line, clamped } => format!(
            "updated {} x{}{}",
            line.id,
            line.quantity,
            clamp_note(*clamped, line.stock)
        ),
        CartOutcome::Removed { id } => format!("removed {id}"),
        CartOutcome::Refused(reason) => format!("unchanged: {}", refusal_reason(*reason)),
        CartOutcome::NotFound => "unchanged: no such line".to_string(),
    }
}

fn clamp_note(clamped: bool, stock: u32) -> String {
    if clamped {
        format!(" (limited to {stock} in stock)")
    } else {
        String::new()
    }
}

const fn refusal_reason(reason: Refusal) -> &'static str {
    match reason {
        Refusal::ZeroQuantity => "quantity must be at least 1",
        Refusal::AtStockCap => "line already at available stock",
        Refusal::VariantAtStockCap => "another size of this product is at available stock",
        Refusal::OutOfStock => "out of stock",
    }
}
