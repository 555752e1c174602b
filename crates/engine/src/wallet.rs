//! Wallet service: balance reads, top-ups, and the settlement debit.

use std::sync::Arc;

use brewline_core::Money;

use crate::error::{Result, ValidationError};
use crate::store::{KeyLocks, KeyValueStore, keys};

/// Balance a brand-new wallet starts with.
///
/// Inherited from the original app, which seeded every wallet with this
/// figure so the demo checkout always succeeds.
#[must_use]
pub fn default_balance() -> Money {
    Money::parse_loose("9999999999")
}

/// Operations over the persisted wallet balance.
pub struct WalletService<S> {
    store: Arc<S>,
    locks: Arc<KeyLocks>,
}

impl<S> Clone for WalletService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S: KeyValueStore> WalletService<S> {
    pub(crate) fn new(store: Arc<S>, locks: Arc<KeyLocks>) -> Self {
        Self { store, locks }
    }

    /// Current balance; an absent or malformed value reads as the seed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway read fails.
    pub async fn balance(&self) -> Result<Money> {
        load_balance(&*self.store).await
    }

    /// Add funds: `balance += amount`, persisted immediately.
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveTopUp`] (before any mutation)
    /// if `amount` is zero, or [`crate::EngineError::Store`] if persisting
    /// fails.
    pub async fn add_funds(&self, amount: Money) -> Result<Money> {
        if amount.is_zero() {
            return Err(ValidationError::NonPositiveTopUp.into());
        }
        let _guard = self.locks.acquire(keys::WALLET_BALANCE).await;
        let balance = load_balance(&*self.store).await? + amount;
        store_balance(&*self.store, balance).await?;
        tracing::info!(%amount, %balance, "wallet topped up");
        Ok(balance)
    }
}

/// Gateway-boundary load with fallback to the seed balance.
pub(crate) async fn load_balance<S: KeyValueStore>(store: &S) -> Result<Money> {
    let balance = match store.get(keys::WALLET_BALANCE).await? {
        Some(raw) => Money::parse_loose(&raw),
        None => default_balance(),
    };
    Ok(balance)
}

/// Persist the balance as a bare decimal string.
pub(crate) async fn store_balance<S: KeyValueStore>(store: &S, balance: Money) -> Result<()> {
    store
        .set(keys::WALLET_BALANCE, &balance.amount().to_string())
        .await?;
    Ok(())
}
