//! Integration tests for Go Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_operations` - Add/increment/decrement behaviour of the store
//! - `cart_persistence` - Hydration and storage round-trips on disk
//!
//! This library holds the fixtures shared by the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use go_marketplace_cart::{CartStore, KeyValueStorage, MemoryStorage, Result, StoreOptions};
use go_marketplace_core::{NewCartItem, Price, ProductId};

/// The product used throughout the scenarios: `{a, Shoe, x, 10}`.
#[must_use]
pub fn shoe() -> NewCartItem {
    product("a", "Shoe", 10)
}

/// Build a catalog product.
#[must_use]
pub fn product(id: &str, title: &str, price: i64) -> NewCartItem {
    NewCartItem {
        id: ProductId::new(id),
        title: title.to_string(),
        image_url: "x".to_string(),
        price: Price::from(price),
    }
}

/// A store over fresh in-memory storage, plus that storage for inspection.
///
/// # Errors
///
/// Propagates hydration errors (in-memory storage never fails).
pub async fn memory_store() -> Result<(CartStore, Arc<MemoryStorage>)> {
    let storage = Arc::new(MemoryStorage::new());
    let store = CartStore::load(
        Arc::clone(&storage) as Arc<dyn KeyValueStorage>,
        StoreOptions::default(),
    )
    .await?;
    Ok((store, storage))
}
