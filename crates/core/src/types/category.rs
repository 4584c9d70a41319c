//! Category canonicalization.
//!
//! Catalog category labels are free-form ("Kids Necklace Collection",
//! "Lumière Earrings", ...). Cart and wishlist entries store one of a small
//! canonical set instead so filters and badges stay consistent.
//!
//! ## Classification rules
//!
//! 1. Trailing whitespace is ignored, a trailing `" Collection"` suffix is
//!    removed (case-insensitive) and the remainder trimmed. The suffix keeps
//!    its leading space, so a bare `" Collection"` label cleans to `""`.
//! 2. The cleaned label is matched case-insensitively, first hit wins:
//!    - contains `kids` or `necklace` => [`Category::Necklaces`]
//!    - contains `earring` => [`Category::Earrings`]
//!    - contains `ring` => [`Category::Rings`]
//!    - contains `bracelet` => [`Category::Bracelets`]
//! 3. Otherwise the last whitespace-delimited token of the cleaned label is
//!    used verbatim ([`Category::Other`]); an empty label yields `""`.
//!
//! `earring` is tested before `ring` because every earring label also
//! contains `ring`.

use core::fmt;

const COLLECTION_SUFFIX: &str = " collection";

/// A canonical display category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Necklaces,
    Earrings,
    Rings,
    Bracelets,
    /// Fallback: last token of the cleaned label.
    Other(String),
}

impl Category {
    /// Classify a raw catalog label.
    ///
    /// ```
    /// use burvon_core::Category;
    ///
    /// assert_eq!(Category::classify("Kids Necklace Collection"), Category::Necklaces);
    /// assert_eq!(Category::classify("Pearl Earrings"), Category::Earrings);
    /// assert_eq!(Category::classify("Heritage Collection"), Category::Other("Heritage".into()));
    /// ```
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let cleaned = strip_collection_suffix(raw.trim_end()).trim();
        let lower = cleaned.to_lowercase();

        if lower.contains("kids") || lower.contains("necklace") {
            Self::Necklaces
        } else if lower.contains("earring") {
            Self::Earrings
        } else if lower.contains("ring") {
            Self::Rings
        } else if lower.contains("bracelet") {
            Self::Bracelets
        } else {
            Self::Other(
                cleaned
                    .split_whitespace()
                    .next_back()
                    .unwrap_or_default()
                    .to_owned(),
            )
        }
    }

    /// Returns the canonical label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Necklaces => "Necklaces",
            Self::Earrings => "Earrings",
            Self::Rings => "Rings",
            Self::Bracelets => "Bracelets",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonicalize a raw category label into its stored string form.
///
/// Idempotent: canonicalizing an already-canonical label returns it unchanged.
#[must_use]
pub fn canonicalize_category(raw: &str) -> String {
    match Category::classify(raw) {
        Category::Other(label) => label,
        known => known.as_str().to_owned(),
    }
}

fn strip_collection_suffix(label: &str) -> &str {
    let Some(split) = label.len().checked_sub(COLLECTION_SUFFIX.len()) else {
        return label;
    };
    match (label.get(..split), label.get(split..)) {
        (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(COLLECTION_SUFFIX) => head,
        _ => label,
    }
}
