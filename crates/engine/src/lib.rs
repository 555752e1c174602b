//! Brewline Engine - cart, wallet, and account services for a local-first
//! coffee-shop storefront.
//!
//! # Architecture
//!
//! Every service is a thin, stateless handle over two shared pieces:
//!
//! - a [`store::KeyValueStore`] - the persistence gateway, an injected async
//!   string-keyed store (the engine never touches a concrete storage
//!   technology)
//! - a [`store::KeyLocks`] registry - per-key async mutexes that serialize
//!   read-modify-write sequences, so two rapid mutations of the same key
//!   cannot silently overwrite each other
//!
//! All mutation flows through these services, so the cart invariants
//! (unique `(id, size)` lines, quantity >= 1) are enforced centrally instead
//! of per-screen. Malformed persisted data never propagates: each load parses
//! with a fallback to the documented default and logs a warning.
//!
//! # Services
//!
//! - [`cart::CartService`] - line-item mutations and the running total
//! - [`wallet::WalletService`] - balance reads and top-ups
//! - [`checkout::CheckoutService`] - the settlement state machine
//! - [`auth::AuthService`] - registration, login, logout
//! - [`profile::ProfileService`] - the user profile blob
//! - [`notifications::NotificationService`] - the notification inbox

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod notifications;
pub mod profile;
pub mod store;
pub mod wallet;

pub use error::{EngineError, Result, ValidationError};
pub use store::{KeyValueStore, StoreError, keys};

use store::KeyLocks;

/// Handle bundling every service over one store.
///
/// Cheaply cloneable; all clones share the same store and lock registry.
pub struct Engine<S> {
    store: Arc<S>,
    locks: Arc<KeyLocks>,
}

impl<S: KeyValueStore> Engine<S> {
    /// Wrap a persistence gateway.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            locks: Arc::new(KeyLocks::new()),
        }
    }

    /// The underlying persistence gateway.
    ///
    /// Useful for hosts that seed or inspect raw keys, e.g. in tests.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cart operations.
    #[must_use]
    pub fn cart(&self) -> cart::CartService<S> {
        cart::CartService::new(Arc::clone(&self.store), Arc::clone(&self.locks))
    }

    /// Wallet operations.
    #[must_use]
    pub fn wallet(&self) -> wallet::WalletService<S> {
        wallet::WalletService::new(Arc::clone(&self.store), Arc::clone(&self.locks))
    }

    /// Checkout and settlement.
    #[must_use]
    pub fn checkout(&self) -> checkout::CheckoutService<S> {
        checkout::CheckoutService::new(Arc::clone(&self.store), Arc::clone(&self.locks))
    }

    /// Registration and login.
    #[must_use]
    pub fn auth(&self) -> auth::AuthService<S> {
        auth::AuthService::new(Arc::clone(&self.store))
    }

    /// Profile editing.
    #[must_use]
    pub fn profile(&self) -> profile::ProfileService<S> {
        profile::ProfileService::new(Arc::clone(&self.store))
    }

    /// Notification inbox.
    #[must_use]
    pub fn notifications(&self) -> notifications::NotificationService<S> {
        notifications::NotificationService::new(Arc::clone(&self.store), Arc::clone(&self.locks))
    }
}

impl<S> Clone for Engine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: Arc::clone(&self.locks),
        }
    }
}
