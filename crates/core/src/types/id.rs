//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Catalog identifiers
//! are opaque strings owned by the catalog service, so every ID wraps a
//! `String`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Size used in a composite key when a line has no size.
pub const DEFAULT_SIZE: &str = "default";

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use burvon_core::define_id;
/// define_id!(SkuId);
/// define_id!(VendorId);
///
/// let sku = SkuId::new("RING-001");
/// let vendor = VendorId::new("RING-001");
///
/// assert_eq!(sku.as_str(), vendor.as_str());
/// // These are different types, so this won't compile:
/// // let _: SkuId = vendor;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);

/// Composite key identifying one cart line: `{product_id}_{size}`.
///
/// A missing size is spelled `"default"`, so `P1` without a size and `P1`
/// with size `"default"` resolve to the same line.
///
/// ```
/// use burvon_core::{LineId, ProductId};
///
/// let product = ProductId::new("P1");
/// assert_eq!(LineId::compose(&product, Some("M")).as_str(), "P1_M");
/// assert_eq!(LineId::compose(&product, None).as_str(), "P1_default");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Derive the key for a product and optional size.
    #[must_use]
    pub fn compose(product_id: &ProductId, size: Option<&str>) -> Self {
        Self(format!("{}_{}", product_id, size.unwrap_or(DEFAULT_SIZE)))
    }

    /// Wrap an already-composed key (e.g. one received from the UI).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for LineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for LineId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_with_size() {
        let id = LineId::compose(&ProductId::new("abc123"), Some("7"));
        assert_eq!(id.as_str(), "abc123_7");
    }

    #[test]
    fn test_compose_without_size_uses_default() {
        let product = ProductId::new("abc123");
        assert_eq!(LineId::compose(&product, None).as_str(), "abc123_default");
        assert_eq!(
            LineId::compose(&product, None),
            LineId::compose(&product, Some(DEFAULT_SIZE))
        );
    }

    #[test]
    fn test_different_sizes_produce_different_keys() {
        let product = ProductId::new("P1");
        assert_ne!(
            LineId::compose(&product, Some("S")),
            LineId::compose(&product, Some("L"))
        );
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let product = ProductId::new("P9");
        assert_eq!(serde_json::to_string(&product).unwrap(), "\"P9\"");

        let line: LineId = serde_json::from_str("\"P9_M\"").unwrap();
        assert_eq!(line, LineId::new("P9_M"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CategoryId::new("cat-4")), "cat-4");
        assert_eq!(format!("{}", LineId::new("P1_L")), "P1_L");
    }
}
