//! Task-local access to a cart store.
//!
//! Most code should take a [`CartStore`] as a parameter. For deeply nested
//! code that can't, [`provide`] installs a store for the duration of a
//! future and [`use_cart`] fetches it from anywhere inside that future.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use go_marketplace_cart::context::{provide, use_cart};
//! use go_marketplace_cart::{CartStore, MemoryStorage, StoreOptions};
//!
//! # async fn demo() {
//! let store = CartStore::new(Arc::new(MemoryStorage::new()), StoreOptions::default());
//!
//! let count = provide(store, async { use_cart().products().len() }).await;
//! assert_eq!(count, 0);
//! # }
//! ```

use std::future::Future;

use crate::store::CartStore;

tokio::task_local! {
    static CURRENT_CART: CartStore;
}

/// Run `future` with `store` installed as the current cart.
///
/// Scopes nest; the innermost store wins.
pub async fn provide<F>(store: CartStore, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_CART.scope(store, future).await
}

/// The cart installed by the enclosing [`provide`] call.
///
/// # Panics
///
/// Panics if called outside a [`provide`] scope. That is a wiring bug, not a
/// runtime condition.
#[must_use]
pub fn use_cart() -> CartStore {
    try_use_cart().unwrap_or_else(|| panic!("use_cart must be used within a cart provider scope"))
}

/// The cart installed by the enclosing [`provide`] call, if any.
#[must_use]
pub fn try_use_cart() -> Option<CartStore> {
    CURRENT_CART.try_with(CartStore::clone).ok()
}
