//! Go Marketplace Cart - Persistent shopping cart store.
//!
//! Holds the in-memory cart, keeps it in sync with a key-value storage
//! backend and publishes every change to subscribers.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the cart. All mutations go through one async
//!   mutex, are published on a `tokio::sync::watch` channel, then persisted.
//! - [`storage::KeyValueStorage`] abstracts the device-local blob store.
//!   [`storage::MemoryStorage`] and [`storage::FileStorage`] are provided.
//! - [`context`] installs a store for a task-local scope, for code that
//!   can't take the handle as a parameter.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use go_marketplace_cart::storage::MemoryStorage;
//! use go_marketplace_cart::store::{CartStore, StoreOptions};
//! use go_marketplace_core::{NewCartItem, Price, ProductId};
//!
//! # async fn demo() -> Result<(), go_marketplace_cart::CartError> {
//! let store = CartStore::load(Arc::new(MemoryStorage::new()), StoreOptions::default()).await?;
//!
//! store
//!     .add_to_cart(NewCartItem {
//!         id: ProductId::new("a"),
//!         title: "Shoe".to_string(),
//!         image_url: "x".to_string(),
//!         price: Price::from(10),
//!     })
//!     .await?;
//! store.increment(&ProductId::new("a")).await?;
//!
//! assert_eq!(store.products().total_quantity(), 2);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod context;
pub mod error;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{CartStore, StoreOptions};
