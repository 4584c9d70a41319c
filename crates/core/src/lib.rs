//! Burvon Core - Shared types library.
//!
//! This crate provides the types used across all Burvon cart components:
//! - `cart` - The cart/wishlist/selection engine
//! - `cli` - Command-line driver for the engine
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! persistence, no timers. This keeps it lightweight and lets the identity
//! and pricing rules be tested in isolation from the merge logic.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, the composite line key, category
//!   canonicalization and display-price parsing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
