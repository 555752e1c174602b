//! The persistence gateway: an injected async key-value store.
//!
//! The engine consumes this interface and never a concrete storage
//! technology. Two implementations ship with the crate: [`MemoryStore`] for
//! tests and [`JsonFileStore`] backing the CLI. A host app supplies its own
//! (device storage, browser storage, whatever the platform offers).
//!
//! An absent key is a normal condition (first run), not an error. `set` and
//! `remove` may fail; when they do, in-memory state is not considered
//! durably committed and the error is surfaced to the caller.

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod json_file;
mod locks;
mod memory;

pub use json_file::JsonFileStore;
pub use locks::KeyLocks;
pub use memory::MemoryStore;

use crate::error::{EngineError, Result};

/// Keys the engine persists under.
///
/// These are the exact keys the original app wrote, so existing on-device
/// data keeps working.
pub mod keys {
    /// JSON array of cart line items.
    pub const CART: &str = "cart";
    /// Running checkout total, a bare decimal string.
    pub const TOTAL_PRICE: &str = "totalPrice";
    /// Wallet balance, a bare decimal string.
    pub const WALLET_BALANCE: &str = "walletBalance";
    /// JSON profile blob.
    pub const USER_PROFILE: &str = "userProfile";
    /// Email address of the active session.
    pub const LOGGED_IN_USER: &str = "loggedInUser";
    /// JSON array of notifications.
    pub const NOTIFICATIONS: &str = "notifications";
    /// In-flight settlement journal record (crash recovery).
    pub const SETTLEMENT: &str = "settlement";
}

/// Errors from a key-value store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not the expected JSON shape.
    #[error("store file is corrupt: {0}")]
    Corrupt(String),
}

/// An asynchronous string-keyed, string-valued store.
///
/// All calls may suspend. Implementations must be usable from multiple tasks;
/// the engine serializes read-modify-write sequences itself via [`KeyLocks`],
/// so implementations only need individual operations to be atomic.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value under `key`, `None` if absent.
    fn get(&self, key: &str) -> impl Future<Output = std::result::Result<Option<String>, StoreError>> + Send;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = std::result::Result<(), StoreError>> + Send;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = std::result::Result<(), StoreError>> + Send;
}

/// Load a JSON value, falling back to `T::default()` when the key is absent
/// or the stored blob is malformed.
///
/// Malformed data is logged and replaced rather than propagated: a broken
/// cart blob must read as an empty cart, not an error.
pub(crate) async fn get_json_or_default<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(key, %err, "malformed persisted value, using default");
            Ok(T::default())
        }
    }
}

/// Serialize `value` to JSON and write it under `key`.
pub(crate) async fn set_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize,
    S: KeyValueStore,
{
    let raw = serde_json::to_string(value).map_err(|err| EngineError::Parse {
        key: key.to_string(),
        reason: err.to_string(),
    })?;
    store.set(key, &raw).await?;
    Ok(())
}
