//! Per-key mutation locks.
//!
//! Persisted mutations are read-modify-write sequences against a store with
//! no transactions. Two interleaved sequences on the same key (a rapid
//! double-tap on "increase quantity") would let the second write silently
//! overwrite the first's effect. Every mutating service method therefore
//! holds the key's lock across its whole sequence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per store key.
///
/// Locks are created lazily on first use and never dropped; the key space is
/// a handful of fixed names plus one per registered account.
#[derive(Debug, Default)]
pub struct KeyLocks {
    inner: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, key: &str) -> Arc<Mutex<()>> {
        let mut map = match self.inner.lock() {
            Ok(guard) => guard,
            // A poisoned map only means another thread panicked while
            // inserting; the map itself is still usable.
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(map.entry(key.to_string()).or_default())
    }

    /// Acquire the lock for `key`, waiting if another sequence holds it.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        self.entry(key).lock_owned().await
    }

    /// Acquire two keys' locks in a canonical order.
    ///
    /// Always locking in sorted key order means two callers locking the same
    /// pair can never deadlock against each other.
    pub async fn acquire_pair(
        &self,
        a: &str,
        b: &str,
    ) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let first_guard = self.acquire(first).await;
        let second_guard = self.acquire(second).await;
        (first_guard, second_guard)
    }
}
