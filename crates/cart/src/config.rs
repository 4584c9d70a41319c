//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BURVON_STORAGE_DIR` - Directory for the filesystem store (default: `.burvon`)
//! - `BURVON_NAMESPACE` - Prefix for persisted keys (default: `burvon`)
//! - `BURVON_NOTIFICATION_SECS` - Seconds before an "item added"
//!   notification dismisses itself (default: 5)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_STORAGE_DIR: &str = ".burvon";
const DEFAULT_NAMESPACE: &str = "burvon";
const DEFAULT_NOTIFICATION_SECS: u64 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Root directory for the filesystem key-value store
    pub storage_dir: PathBuf,
    /// Key prefix; the cart lives under `{namespace}_cart`
    pub namespace: String,
    /// Auto-dismiss delay for add-to-cart notifications
    pub notification_timeout: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            namespace: DEFAULT_NAMESPACE.to_string(),
            notification_timeout: Duration::from_secs(DEFAULT_NOTIFICATION_SECS),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage_dir = PathBuf::from(get_or_default("BURVON_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        let namespace = parse_namespace(&get_or_default("BURVON_NAMESPACE", DEFAULT_NAMESPACE))?;
        let notification_timeout = lookup("BURVON_NOTIFICATION_SECS")
            .map_or(Ok(DEFAULT_NOTIFICATION_SECS), |raw| {
                raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("BURVON_NOTIFICATION_SECS".to_string(), e.to_string())
                })
            })
            .map(Duration::from_secs)?;

        Ok(Self {
            storage_dir,
            namespace,
            notification_timeout,
        })
    }

    /// Key under which cart lines are persisted.
    #[must_use]
    pub fn cart_key(&self) -> String {
        format!("{}_cart", self.namespace)
    }

    /// Key under which wishlist items are persisted.
    #[must_use]
    pub fn wishlist_key(&self) -> String {
        format!("{}_wishlist", self.namespace)
    }

    /// Key under which the checkout selection is persisted.
    #[must_use]
    pub fn selection_key(&self) -> String {
        format!("{}_selection", self.namespace)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Namespaces become file names, so keep them to a safe alphabet.
fn parse_namespace(raw: &str) -> Result<String, ConfigError> {
    let valid = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(raw.to_string())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "BURVON_NAMESPACE".to_string(),
            format!("'{raw}' must be non-empty and contain only [A-Za-z0-9_-]"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let config = CartConfig::default();
        assert_eq!(config.cart_key(), "burvon_cart");
        assert_eq!(config.wishlist_key(), "burvon_wishlist");
        assert_eq!(config.selection_key(), "burvon_selection");
        assert_eq!(config.notification_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_custom_namespace_keys() {
        let config = CartConfig {
            namespace: "staging".to_string(),
            ..CartConfig::default()
        };
        assert_eq!(config.cart_key(), "staging_cart");
        assert_eq!(config.wishlist_key(), "staging_wishlist");
    }

    #[test]
    fn test_parse_namespace_valid() {
        assert_eq!(parse_namespace("burvon-dev_2").unwrap(), "burvon-dev_2");
    }

    #[test]
    fn test_parse_namespace_rejects_paths() {
        let err = parse_namespace("../etc").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
        assert!(parse_namespace("").is_err());
        assert!(parse_namespace("with space").is_err());
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = CartConfig::from_lookup(lookup(&[
            ("BURVON_STORAGE_DIR", "/var/lib/burvon"),
            ("BURVON_NAMESPACE", "staging"),
            ("BURVON_NOTIFICATION_SECS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/burvon"));
        assert_eq!(config.cart_key(), "staging_cart");
        assert_eq!(config.notification_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err =
            CartConfig::from_lookup(lookup(&[("BURVON_NOTIFICATION_SECS", "soon")])).unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidEnvVar(name, _) if name == "BURVON_NOTIFICATION_SECS")
        );

        assert!(CartConfig::from_lookup(lookup(&[("BURVON_NOTIFICATION_SECS", "-1")])).is_err());
    }

    #[test]
    fn test_from_lookup_rejects_bad_namespace() {
        let err = CartConfig::from_lookup(lookup(&[("BURVON_NAMESPACE", "a/b")])).unwrap_err();
        assert!(matches!(&err, ConfigError::InvalidEnvVar(name, _) if name == "BURVON_NAMESPACE"));
    }

    // The only test in this crate that touches the process environment
    #[test]
    #[allow(unsafe_code)]
    fn test_from_env_reports_invalid_variables() {
        // SAFETY: no other test in this crate reads or writes these variables
        unsafe { std::env::set_var("BURVON_NOTIFICATION_SECS", "five") };
        let timeout = CartConfig::from_env();
        unsafe { std::env::remove_var("BURVON_NOTIFICATION_SECS") };
        assert!(matches!(timeout, Err(ConfigError::InvalidEnvVar(_, _))));

        unsafe { std::env::set_var("BURVON_NAMESPACE", "../escape") };
        let namespace = CartConfig::from_env();
        unsafe { std::env::remove_var("BURVON_NAMESPACE") };
        assert!(matches!(namespace, Err(ConfigError::InvalidEnvVar(_, _))));

        assert!(CartConfig::from_env().is_ok());
    }
}
