//! Core types for Burvon.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod category;
pub mod id;
pub mod price;

pub use category::{Category, canonicalize_category};
pub use id::*;
pub use price::{CurrencyCode, Price, parse_amount};
