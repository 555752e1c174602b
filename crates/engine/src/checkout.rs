//! Checkout service: the settlement state machine.
//!
//! ```text
//! Idle -> Confirming -> Settling -> Settled
//!              |
//!              +-> Aborted (cancel, or insufficient funds)
//! ```
//!
//! Settling performs three persistence writes (wallet debit, cart clear,
//! running-total reset) that the store cannot make atomic. The chosen
//! ordering is debit before clear, and a journal record written before the
//! first write names the attempt, the total, and the pre-debit balance. A
//! crash anywhere in the sequence leaves the journal behind; [`CheckoutService::recover`]
//! replays the remainder exactly once, keyed by the journal's attempt id.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewline_core::{Money, SettlementState};

use crate::error::{Result, ValidationError};
use crate::store::{self, KeyLocks, KeyValueStore, keys};
use crate::{cart, wallet};

/// A quoted checkout in the `Confirming` state.
///
/// Holding a quote is the only way to reach [`CheckoutService::confirm`];
/// the type encodes the state machine, so confirming from `Idle` is not
/// expressible.
#[derive(Debug, Clone)]
pub struct SettlementQuote {
    /// Identifier for this settlement attempt.
    pub attempt_id: Uuid,
    /// Cart total frozen at quote time.
    pub total: Money,
}

/// Outcome of a completed settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Identifier of the settled attempt.
    pub attempt_id: Uuid,
    /// Amount debited from the wallet.
    pub total: Money,
    /// Wallet balance after the debit.
    pub balance_after: Money,
    /// Always [`SettlementState::Settled`].
    pub state: SettlementState,
}

/// Journal record persisted for the duration of the write sequence.
#[derive(Debug, Serialize, Deserialize)]
struct SettlementJournal {
    attempt_id: Uuid,
    total: Money,
    balance_before: Money,
    state: SettlementState,
}

/// Drives a cart through settlement against the wallet.
pub struct CheckoutService<S> {
    store: Arc<S>,
    locks: Arc<KeyLocks>,
}

impl<S> Clone for CheckoutService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S: KeyValueStore> CheckoutService<S> {
    pub(crate) fn new(store: Arc<S>, locks: Arc<KeyLocks>) -> Self {
        Self { store, locks }
    }

    /// `Idle -> Confirming`: quote the current cart for settlement.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCart`] if the cart total is zero
    /// (nothing is mutated), or [`crate::EngineError::Store`] if the cart
    /// cannot be read.
    pub async fn begin(&self) -> Result<SettlementQuote> {
        let total = cart::load_cart(&*self.store).await?.total();
        if total.is_zero() {
            return Err(ValidationError::EmptyCart.into());
        }
        Ok(SettlementQuote {
            attempt_id: Uuid::new_v4(),
            total,
        })
    }

    /// `Confirming -> Aborted`: drop the quote. No state mutation occurs.
    #[allow(clippy::unused_self)]
    pub fn cancel(&self, quote: SettlementQuote) -> SettlementState {
        tracing::info!(attempt = %quote.attempt_id, "settlement aborted by user");
        SettlementState::Aborted
    }

    /// `Confirming -> Settling -> Settled`: debit the wallet by the quoted
    /// total, clear the cart, and zero the running total.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InsufficientFunds`] if the balance does not
    /// cover the total - neither wallet nor cart is touched. Returns
    /// [`crate::EngineError::Store`] if a persistence write fails; the
    /// journal then remains for [`Self::recover`].
    pub async fn confirm(&self, quote: SettlementQuote) -> Result<Receipt> {
        let _guards = self
            .locks
            .acquire_pair(keys::CART, keys::WALLET_BALANCE)
            .await;

        let balance = wallet::load_balance(&*self.store).await?;
        let Some(balance_after) = balance.checked_sub(quote.total) else {
            return Err(ValidationError::InsufficientFunds {
                balance,
                total: quote.total,
            }
            .into());
        };

        let journal = SettlementJournal {
            attempt_id: quote.attempt_id,
            total: quote.total,
            balance_before: balance,
            state: SettlementState::Settling,
        };
        store::set_json(&*self.store, keys::SETTLEMENT, &journal).await?;

        // Ordering: debit before clear. A crash after the debit leaves money
        // gone but the cart intact; recover() finishes the clear rather than
        // double-charging.
        wallet::store_balance(&*self.store, balance_after).await?;
        self.store.remove(keys::CART).await?;
        self.store.set(keys::TOTAL_PRICE, "0").await?;
        self.store.remove(keys::SETTLEMENT).await?;

        tracing::info!(
            attempt = %quote.attempt_id,
            total = %quote.total,
            %balance_after,
            "settlement complete"
        );
        Ok(Receipt {
            attempt_id: quote.attempt_id,
            total: quote.total,
            balance_after,
            state: SettlementState::Settled,
        })
    }

    /// Finish a settlement interrupted by a crash.
    ///
    /// Reads the journal left by [`Self::confirm`]; if none exists this is a
    /// no-op returning `None`. The replay is idempotent per attempt: the
    /// debit is re-applied only when the persisted balance still equals the
    /// journalled pre-debit balance, then the cart clear and total reset are
    /// completed and the journal removed.
    ///
    /// Call once on startup, before any other wallet or cart operation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway fails.
    pub async fn recover(&self) -> Result<Option<Receipt>> {
        let _guards = self
            .locks
            .acquire_pair(keys::CART, keys::WALLET_BALANCE)
            .await;

        let Some(raw) = self.store.get(keys::SETTLEMENT).await? else {
            return Ok(None);
        };
        let journal: SettlementJournal = match serde_json::from_str(&raw) {
            Ok(journal) => journal,
            Err(err) => {
                // Unreadable journal: nothing to replay from. Drop it so it
                // does not block future settlements.
                tracing::warn!(%err, "discarding malformed settlement journal");
                self.store.remove(keys::SETTLEMENT).await?;
                return Ok(None);
            }
        };

        let balance = wallet::load_balance(&*self.store).await?;
        let balance_after = if balance == journal.balance_before {
            // Crash happened before the debit was persisted; apply it now.
            match journal.balance_before.checked_sub(journal.total) {
                Some(after) => {
                    wallet::store_balance(&*self.store, after).await?;
                    after
                }
                None => {
                    tracing::warn!(
                        attempt = %journal.attempt_id,
                        "journalled settlement no longer covered by balance, dropping"
                    );
                    self.store.remove(keys::SETTLEMENT).await?;
                    return Ok(None);
                }
            }
        } else {
            // Debit already landed; only the clear was interrupted.
            balance
        };

        self.store.remove(keys::CART).await?;
        self.store.set(keys::TOTAL_PRICE, "0").await?;
        self.store.remove(keys::SETTLEMENT).await?;

        tracing::info!(
            attempt = %journal.attempt_id,
            total = %journal.total,
            "interrupted settlement replayed"
        );
        Ok(Some(Receipt {
            attempt_id: journal.attempt_id,
            total: journal.total,
            balance_after,
            state: SettlementState::Settled,
        }))
    }
}
