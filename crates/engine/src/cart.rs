//! Cart service: persisted line-item mutations and the running total.
//!
//! The pure ledger operations live in `brewline-core`; this service wraps
//! them in load -> mutate -> persist sequences, each held under the cart
//! key's lock. Every successful mutation also re-persists the running
//! `totalPrice` so the checkout screen reads a fresh figure.

use std::sync::Arc;

use brewline_core::{Cart, LineItem, Money, ProductId, Size};

use crate::error::Result;
use crate::store::{self, KeyLocks, KeyValueStore, keys};

/// Operations over the persisted cart.
pub struct CartService<S> {
    store: Arc<S>,
    locks: Arc<KeyLocks>,
}

impl<S> Clone for CartService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S: KeyValueStore> CartService<S> {
    pub(crate) fn new(store: Arc<S>, locks: Arc<KeyLocks>) -> Self {
        Self { store, locks }
    }

    /// Load the cart; an absent or malformed blob reads as an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway read fails.
    pub async fn load(&self) -> Result<Cart> {
        load_cart(&*self.store).await
    }

    /// Explicit reload entry point for "screen focus" style events.
    ///
    /// The engine has no dependency on an event loop; the host invokes this
    /// from whatever event system it has.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub async fn refresh(&self) -> Result<Cart> {
        self.load().await
    }

    /// Add an item, merging with an existing `(id, size)` line.
    ///
    /// Returns the updated cart as a value; callers must not assume any
    /// in-place mutation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if persisting fails; the write
    /// is then not durably committed.
    pub async fn add_or_increment(&self, item: LineItem) -> Result<Cart> {
        let _guard = self.locks.acquire(keys::CART).await;
        let mut cart = load_cart(&*self.store).await?;
        cart.add_or_increment(item);
        save_cart(&*self.store, &cart).await?;
        Ok(cart)
    }

    /// Adjust a line's quantity by `delta`, clamped to stay >= 1.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if persisting fails.
    pub async fn change_quantity(
        &self,
        id: ProductId,
        size: Option<Size>,
        delta: i32,
    ) -> Result<Cart> {
        let _guard = self.locks.acquire(keys::CART).await;
        let mut cart = load_cart(&*self.store).await?;
        cart.change_quantity(id, size, delta);
        save_cart(&*self.store, &cart).await?;
        Ok(cart)
    }

    /// Delete the `(id, size)` line; a missing line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if persisting fails.
    pub async fn remove_line(&self, id: ProductId, size: Option<Size>) -> Result<Cart> {
        let _guard = self.locks.acquire(keys::CART).await;
        let mut cart = load_cart(&*self.store).await?;
        cart.remove_line(id, size);
        save_cart(&*self.store, &cart).await?;
        Ok(cart)
    }

    /// Current cart total, recomputed from the stored lines.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway read fails.
    pub async fn total(&self) -> Result<Money> {
        Ok(load_cart(&*self.store).await?.total())
    }
}

/// Gateway-boundary load with fallback: absent or malformed reads as empty.
pub(crate) async fn load_cart<S: KeyValueStore>(store: &S) -> Result<Cart> {
    store::get_json_or_default(store, keys::CART).await
}

/// Persist the cart and its recomputed running total.
///
/// The cart blob is written first; if the `totalPrice` write then fails the
/// stored total is stale, which is tolerable because checkout recomputes the
/// total from the cart lines rather than trusting the cached figure.
pub(crate) async fn save_cart<S: KeyValueStore>(store: &S, cart: &Cart) -> Result<()> {
    store::set_json(store, keys::CART, cart).await?;
    store
        .set(keys::TOTAL_PRICE, &cart.total().amount().to_string())
        .await?;
    Ok(())
}
