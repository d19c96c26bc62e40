//! Cart commands.
//!
//! # Environment Variables
//!
//! - `GO_MARKETPLACE_STORAGE_DIR` - Directory holding the cart file
//! - `GO_MARKETPLACE_CART_KEY` - Storage key of the cart blob
//! - `GO_MARKETPLACE_DECREMENT_POLICY` - `unbounded`, `floor` or `remove`

use std::sync::Arc;

use go_marketplace_cart::{CartConfig, CartError, CartStore, ConfigError, FileStorage};
use go_marketplace_core::{CartChange, NewCartItem, Price, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart store operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

/// Open the file-backed cart described by the environment.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the cart can't be read.
pub async fn open_store() -> Result<CartStore, CartCommandError> {
    let config = CartConfig::from_env()?;
    info!(
        dir = %config.storage_dir.display(),
        key = %config.cart_key,
        policy = %config.decrement_policy,
        "Opening cart"
    );

    let storage = FileStorage::new(&config.storage_dir);
    Ok(CartStore::load(Arc::new(storage), config.store_options()).await?)
}

/// Log every line, then the item count and subtotal.
///
/// Totals too large for a decimal are reported as an overflow.
pub fn show(store: &CartStore) {
    let cart = store.products();

    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    for item in cart.items() {
        info!(
            "  {} x{} {} @ {} = {}",
            item.id,
            item.quantity,
            item.title,
            item.price.display(),
            format_total(item.line_total())
        );
    }
    info!("Items in cart: {}", cart.total_quantity());
    info!("Subtotal: {}", format_total(cart.subtotal()));
}

fn format_total(total: Option<Decimal>) -> String {
    total.map_or_else(|| "overflow".to_string(), |amount| Price::new(amount).display())
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the cart can't be persisted.
pub async fn add(
    store: &CartStore,
    id: String,
    title: String,
    image_url: String,
    price: Decimal,
) -> Result<CartChange, CartCommandError> {
    let change = store
        .add_to_cart(NewCartItem {
            id: ProductId::new(id),
            title,
            image_url,
            price: Price::new(price),
        })
        .await?;

    report(&change);
    Ok(change)
}

/// Add one unit to an existing line.
///
/// # Errors
///
/// Returns an error if the cart can't be persisted.
pub async fn increment(store: &CartStore, id: &str) -> Result<CartChange, CartCommandError> {
    let change = store.increment(&ProductId::from(id)).await?;
    report_for(id, &change);
    Ok(change)
}

/// Remove one unit from an existing line.
///
/// # Errors
///
/// Returns an error if the cart can't be persisted.
pub async fn decrement(store: &CartStore, id: &str) -> Result<CartChange, CartCommandError> {
    let change = store.decrement(&ProductId::from(id)).await?;
    report_for(id, &change);
    Ok(change)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the stored blob can't be removed.
pub async fn clear(store: &CartStore) -> Result<CartChange, CartCommandError> {
    let change = store.clear().await?;
    report(&change);
    Ok(change)
}

fn report(change: &CartChange) {
    match change {
        CartChange::Added => info!("Product added"),
        CartChange::Incremented { quantity } => info!("Quantity is now {quantity}"),
        CartChange::Decremented { quantity } => info!("Quantity is now {quantity}"),
        CartChange::Removed => info!("Line removed"),
        CartChange::Cleared => info!("Cart cleared"),
        CartChange::Unchanged => info!("Nothing to change"),
    }
}

fn report_for(id: &str, change: &CartChange) {
    if matches!(change, CartChange::Unchanged) {
        warn!("Product {id} is not in the cart");
    } else {
        report(change);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use go_marketplace_cart::StoreOptions;
    use tempfile::TempDir;

    use super::*;

    async fn file_store(dir: &TempDir) -> CartStore {
        CartStore::load(
            Arc::new(FileStorage::new(dir.path())),
            StoreOptions::default(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_then_reopen() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir).await;

        let change = add(
            &store,
            "a".to_string(),
            "Shoe".to_string(),
            "x".to_string(),
            Decimal::new(1999, 2),
        )
        .await
        .unwrap();
        assert_eq!(change, CartChange::Added);

        let reopened = file_store(&dir).await;
        let cart = reopened.products();
        assert_eq!(cart.items()[0].price, Price::from_cents(1999));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_show_survives_overflowing_totals() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir).await;
        for _ in 0..2 {
            add(
                &store,
                "yacht".to_string(),
                "Yacht".to_string(),
                "x".to_string(),
                Decimal::MAX,
            )
            .await
            .unwrap();
        }

        show(&store);

        assert_eq!(store.products().subtotal(), None);
        assert_eq!(format_total(None), "overflow");
        assert_eq!(format_total(Some(Decimal::new(1999, 2))), "$19.99");
    }

    #[tokio::test]
    async fn test_increment_unknown_reports_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir).await;

        let change = increment(&store, "missing").await.unwrap();
        assert_eq!(change, CartChange::Unchanged);
        assert!(!FileStorage::new(dir.path()).path_for("goMarketplace:cart").exists());
    }

    #[tokio::test]
    async fn test_decrement_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir).await;
        add(
            &store,
            "a".to_string(),
            "Shoe".to_string(),
            "x".to_string(),
            Decimal::from(10),
        )
        .await
        .unwrap();

        let change = decrement(&store, "a").await.unwrap();
        assert_eq!(change, CartChange::Decremented { quantity: 0 });

        show(&store);

        assert_eq!(clear(&store).await.unwrap(), CartChange::Cleared);
        assert!(file_store(&dir).await.products().is_empty());
    }
}
