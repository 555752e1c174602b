//! File-backed store for the CLI.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::StoreError;

/// A [`super::KeyValueStore`] persisting all keys into one JSON object file.
///
/// Writes go through a temp file followed by a rename, so a crash mid-write
/// leaves the previous file intact rather than a truncated one. A mutex
/// serializes file access within the process; this store is not safe against
/// concurrent writers from other processes.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Use (or create on first write) the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<HashMap<String, String>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&raw).map_err(|err| StoreError::Corrupt(err.to_string()))
    }

    async fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl super::KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.io_lock.lock().await;
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.io_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.io_lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::KeyValueStore;

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store.json"));

        assert_eq!(store.get("cart").await.unwrap(), None);
        store.set("cart", "[]").await.unwrap();
        store.set("walletBalance", "100").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap(), Some("[]".to_string()));

        // A fresh handle over the same file sees the data.
        let reopened = JsonFileStore::new(dir.path().join("store.json"));
        assert_eq!(
            reopened.get("walletBalance").await.unwrap(),
            Some("100".to_string())
        );

        store.remove("cart").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(
            store.get("cart").await,
            Err(StoreError::Corrupt(_))
        ));
    }
}
