//! Notification subcommands.

use brewline_core::NotificationId;
use brewline_engine::{Engine, KeyValueStore, Result};

/// Print all entries, oldest first.
pub async fn list<S: KeyValueStore>(engine: &Engine<S>) -> Result<()> {
    let entries = engine.notifications().list().await?;
    if entries.is_empty() {
        tracing::info!("No notifications");
        return Ok(());
    }
    for entry in entries {
        tracing::info!("[{}] {} - {}", entry.id, entry.date, entry.message);
    }
    Ok(())
}

/// Delete one entry by id.
pub async fn delete<S: KeyValueStore>(engine: &Engine<S>, id: i64) -> Result<()> {
    engine.notifications().delete(NotificationId::new(id)).await?;
    tracing::info!("Deleted notification {id}");
    Ok(())
}

/// Drop the whole inbox.
pub async fn clear<S: KeyValueStore>(engine: &Engine<S>) -> Result<()> {
    engine.notifications().clear_all().await?;
    tracing::info!("Notifications cleared");
    Ok(())
}
