//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GO_MARKETPLACE_STORAGE_DIR` - Directory for file-backed storage (default: .go-marketplace)
//! - `GO_MARKETPLACE_CART_KEY` - Storage key of the cart blob (default: goMarketplace:cart)
//! - `GO_MARKETPLACE_DECREMENT_POLICY` - `unbounded`, `floor` or `remove` (default: unbounded)

use std::path::PathBuf;

use go_marketplace_core::DecrementPolicy;
use thiserror::Error;

use crate::store::StoreOptions;

/// Default directory for file-backed storage.
pub const DEFAULT_STORAGE_DIR: &str = ".go-marketplace";

/// Default storage key of the cart blob.
pub const DEFAULT_CART_KEY: &str = "goMarketplace:cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory used by file-backed storage
    pub storage_dir: PathBuf,
    /// Key the cart blob is stored under
    pub cart_key: String,
    /// How decrement treats lines at zero
    pub decrement_policy: DecrementPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            decrement_policy: DecrementPolicy::default(),
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
    /// Returns `ConfigError` if the cart key is empty or the decrement policy
    /// is not recognized.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = lookup("GO_MARKETPLACE_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let cart_key =
            lookup("GO_MARKETPLACE_CART_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
        if cart_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "GO_MARKETPLACE_CART_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let decrement_policy = match lookup("GO_MARKETPLACE_DECREMENT_POLICY") {
            Some(value) => value.parse::<DecrementPolicy>().map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "GO_MARKETPLACE_DECREMENT_POLICY".to_string(),
                    e.to_string(),
                )
            })?,
            None => DecrementPolicy::default(),
        };

        Ok(Self {
            storage_dir,
            cart_key,
            decrement_policy,
        })
    }

    /// Options for constructing a [`CartStore`](crate::store::CartStore).
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            storage_key: self.cart_key.clone(),
            decrement_policy: self.decrement_policy,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.cart_key, "goMarketplace:cart");
        assert_eq!(config.decrement_policy, DecrementPolicy::Unbounded);
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("GO_MARKETPLACE_STORAGE_DIR", "/tmp/carts"),
            ("GO_MARKETPLACE_CART_KEY", "shop:cart"),
            ("GO_MARKETPLACE_DECREMENT_POLICY", "remove"),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(config.cart_key, "shop:cart");
        assert_eq!(config.decrement_policy, DecrementPolicy::RemoveAtZero);
    }

    #[test]
    fn test_empty_key_rejected() {
        let result =
            CartConfig::from_lookup(lookup_from(&[("GO_MARKETPLACE_CART_KEY", "  ")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(name, _)) if name == "GO_MARKETPLACE_CART_KEY"));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = CartConfig::from_lookup(lookup_from(&[(
            "GO_MARKETPLACE_DECREMENT_POLICY",
            "sometimes",
        )]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_store_options() {
        let config = CartConfig {
            decrement_policy: DecrementPolicy::FloorAtZero,
            ..CartConfig::default()
        };
        let options = config.store_options();
        assert_eq!(options.storage_key, "goMarketplace:cart");
        assert_eq!(options.decrement_policy, DecrementPolicy::FloorAtZero);
    }
}
