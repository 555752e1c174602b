//! Notification feed service.
//!
//! The feed is a single JSON array under one key, newest entries appended at
//! the end. IDs are millisecond timestamps, bumped past the current maximum
//! when two pushes land within the same millisecond.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use brewline_core::NotificationId;

use crate::error::Result;
use crate::store::{self, KeyLocks, KeyValueStore, keys};

/// One entry in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    /// RFC 3339 timestamp of when the entry was pushed.
    pub date: String,
}

/// Append, list, and delete over the persisted feed.
pub struct NotificationService<S> {
    store: Arc<S>,
    locks: Arc<KeyLocks>,
}

impl<S> Clone for NotificationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S: KeyValueStore> NotificationService<S> {
    pub(crate) fn new(store: Arc<S>, locks: Arc<KeyLocks>) -> Self {
        Self { store, locks }
    }

    /// All entries, oldest first; absent or malformed reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway read fails.
    pub async fn list(&self) -> Result<Vec<Notification>> {
        store::get_json_or_default(&*self.store, keys::NOTIFICATIONS).await
    }

    /// Append an entry and return it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if persisting fails.
    pub async fn push(&self, message: impl Into<String>) -> Result<Notification> {
        let _guard = self.locks.acquire(keys::NOTIFICATIONS).await;
        let mut entries: Vec<Notification> =
            store::get_json_or_default(&*self.store, keys::NOTIFICATIONS).await?;

        let now = Utc::now();
        let mut id = now.timestamp_millis();
        if let Some(max) = entries.iter().map(|n| n.id.as_i64()).max() {
            if id <= max {
                id = max + 1;
            }
        }

        let entry = Notification {
            id: NotificationId::new(id),
            message: message.into(),
            date: now.to_rfc3339(),
        };
        entries.push(entry.clone());
        store::set_json(&*self.store, keys::NOTIFICATIONS, &entries).await?;
        Ok(entry)
    }

    /// Delete the entry with `id`; an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if persisting fails.
    pub async fn delete(&self, id: NotificationId) -> Result<()> {
        let _guard = self.locks.acquire(keys::NOTIFICATIONS).await;
        let mut entries: Vec<Notification> =
            store::get_json_or_default(&*self.store, keys::NOTIFICATIONS).await?;
        entries.retain(|n| n.id != id);
        store::set_json(&*self.store, keys::NOTIFICATIONS, &entries).await?;
        Ok(())
    }

    /// Drop the whole feed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway fails.
    pub async fn clear_all(&self) -> Result<()> {
        let _guard = self.locks.acquire(keys::NOTIFICATIONS).await;
        self.store.remove(keys::NOTIFICATIONS).await?;
        Ok(())
    }
}
