//! The cart store.
//!
//! # Consistency
//!
//! Every mutation takes the same async mutex, computes the next cart from the
//! latest snapshot, publishes it on the watch channel and then writes it to
//! storage before releasing the mutex. Callers therefore never act on a stale
//! cart, and storage writes land in the same order as the in-memory updates.
//! Readers go through the watch channel and never wait on the mutex.
//!
//! Operations that don't change the cart publish nothing and write nothing,
//! so the `Arc` returned by [`CartStore::products`] stays identical and
//! consumers can skip recomputation with `Arc::ptr_eq`.

use std::fmt;
use std::sync::Arc;

use go_marketplace_core::{Cart, CartChange, DecrementPolicy, NewCartItem, ProductId};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::config::DEFAULT_CART_KEY;
use crate::error::Result;
use crate::storage::KeyValueStorage;

/// Options for a [`CartStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Key the cart blob is stored under.
    pub storage_key: String,
    /// How `decrement` treats lines at zero.
    pub decrement_policy: DecrementPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            decrement_policy: DecrementPolicy::default(),
        }
    }
}

/// Shared handle to the cart.
///
/// Cheaply cloneable via `Arc`; every clone sees and mutates the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    storage: Arc<dyn KeyValueStorage>,
    options: StoreOptions,
    mutation: Mutex<()>,
    snapshots: watch::Sender<Arc<Cart>>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("options", &self.inner.options)
            .field("items", &self.inner.snapshots.borrow().len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store with an empty cart.
    ///
    /// Nothing is read from storage until [`CartStore::hydrate`] runs.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, options: StoreOptions) -> Self {
        let (snapshots, _) = watch::channel(Arc::new(Cart::new()));

        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                options,
                mutation: Mutex::new(()),
                snapshots,
            }),
        }
    }

    /// Create a store and hydrate it from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    pub async fn load(storage: Arc<dyn KeyValueStorage>, options: StoreOptions) -> Result<Self> {
        let store = Self::new(storage, options);
        store.hydrate().await?;
        Ok(store)
    }

    /// Replace the in-memory cart with the persisted one.
    ///
    /// A missing, empty or unparseable blob yields an empty cart. A bad blob
    /// is left in place; the next mutation overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read. The current
    /// cart is kept in that case.
    #[instrument(skip(self), fields(key = %self.inner.options.storage_key))]
    pub async fn hydrate(&self) -> Result<()> {
        let _guard = self.inner.mutation.lock().await;

        let cart = match self
            .inner
            .storage
            .get_item(&self.inner.options.storage_key)
            .await?
        {
            Some(raw) => parse_cart(&raw),
            None => {
                debug!("No persisted cart, starting empty");
                Cart::new()
            }
        };

        info!(items = cart.len(), "Cart hydrated");
        self.inner.snapshots.send_replace(Arc::new(cart));
        Ok(())
    }

    /// Current cart snapshot.
    #[must_use]
    pub fn products(&self) -> Arc<Cart> {
        Arc::clone(&self.inner.snapshots.borrow())
    }

    /// Receive every snapshot published from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.inner.snapshots.subscribe()
    }

    /// Options the store was created with.
    #[must_use]
    pub fn options(&self) -> &StoreOptions {
        &self.inner.options
    }

    /// Add one unit of a product, appending a new line if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the new cart can't be persisted. The in-memory
    /// cart keeps the change.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn add_to_cart(&self, item: NewCartItem) -> Result<CartChange> {
        self.mutate(|cart| cart.add(item)).await
    }

    /// Add one unit to an existing line. Unknown IDs are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the new cart can't be persisted.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn increment(&self, id: &ProductId) -> Result<CartChange> {
        self.mutate(|cart| cart.increment(id)).await
    }

    /// Remove one unit from an existing line. Unknown IDs are a no-op.
    ///
    /// What happens at zero depends on [`StoreOptions::decrement_policy`].
    ///
    /// # Errors
    ///
    /// Returns an error if the new cart can't be persisted.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> Result<CartChange> {
        let policy = self.inner.options.decrement_policy;
        self.mutate(|cart| cart.decrement(id, policy)).await
    }

    /// Empty the cart and delete the persisted blob.
    ///
    /// The blob is removed even when the cart is already empty, so a blob
    /// that failed to hydrate is discarded too. Returns
    /// [`CartChange::Unchanged`] in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob can't be removed from storage.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<CartChange> {
        let _guard = self.inner.mutation.lock().await;

        let mut next = (**self.inner.snapshots.borrow()).clone();
        let change = next.clear();
        if change.is_change() {
            self.inner.snapshots.send_replace(Arc::new(next));
        }

        if let Err(e) = self
            .inner
            .storage
            .remove_item(&self.inner.options.storage_key)
            .await
        {
            warn!(error = %e, "Failed to remove persisted cart");
            return Err(e.into());
        }

        info!("Cart cleared");
        Ok(change)
    }

    /// Apply `op` to the latest cart, publish and persist the result.
    async fn mutate<F>(&self, op: F) -> Result<CartChange>
    where
        F: FnOnce(&mut Cart) -> CartChange + Send,
    {
        let _guard = self.inner.mutation.lock().await;

        let mut next = (**self.inner.snapshots.borrow()).clone();
        let change = op(&mut next);
        if !change.is_change() {
            debug!("Cart unchanged");
            return Ok(change);
        }

        let next = Arc::new(next);
        self.inner.snapshots.send_replace(Arc::clone(&next));
        self.persist(&next).await?;

        debug!(?change, "Cart updated");
        Ok(change)
    }

    async fn persist(&self, cart: &Cart) -> Result<()> {
        let blob = serde_json::to_string(cart)?;

        if let Err(e) = self
            .inner
            .storage
            .set_item(&self.inner.options.storage_key, &blob)
            .await
        {
            warn!(error = %e, "Failed to persist cart");
            return Err(e.into());
        }

        debug!(
            items = cart.len(),
            total_quantity = cart.total_quantity(),
            "Cart persisted"
        );
        Ok(())
    }
}

/// Parse a persisted blob, falling back to an empty cart.
fn parse_cart(raw: &str) -> Cart {
    if raw.trim().is_empty() {
        warn!("Persisted cart is blank, starting empty");
        return Cart::new();
    }

    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(error = %e, "Persisted cart is invalid, starting empty");
        Cart::new()
    })
}
