//! Profile subcommands.

use brewline_engine::profile::UserProfile;
use brewline_engine::{Engine, KeyValueStore, Result};

/// Validate and save the profile.
pub async fn set<S: KeyValueStore>(
    engine: &Engine<S>,
    name: String,
    email: String,
    phone: String,
    avatar: String,
) -> Result<()> {
    let profile = UserProfile {
        name,
        email,
        phone,
        avatar,
    };
    engine.profile().save(&profile).await?;
    tracing::info!("Profile saved for {}", profile.name);
    Ok(())
}

/// Print the stored profile.
pub async fn show<S: KeyValueStore>(engine: &Engine<S>) -> Result<()> {
    match engine.profile().load().await? {
        Some(profile) => {
            tracing::info!("Name:  {}", profile.name);
            tracing::info!("Email: {}", profile.email);
            tracing::info!("Phone: {}", profile.phone);
            if !profile.avatar.is_empty() {
                tracing::info!("Avatar: {}", profile.avatar);
            }
        }
        None => tracing::info!("No profile stored"),
    }
    Ok(())
}

/// Delete the stored profile.
pub async fn clear<S: KeyValueStore>(engine: &Engine<S>) -> Result<()> {
    engine.profile().clear().await?;
    tracing::info!("Profile cleared");
    Ok(())
}
