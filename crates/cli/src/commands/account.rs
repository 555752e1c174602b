//! Account subcommands.

use brewline_engine::{Engine, KeyValueStore, Result};

/// Create an account.
pub async fn register<S: KeyValueStore>(
    engine: &Engine<S>,
    email: &str,
    password: &str,
) -> Result<()> {
    let email = engine.auth().register(email, password).await?;
    tracing::info!("Account created for {email}; log in to start a session");
    Ok(())
}

/// Start a session.
pub async fn login<S: KeyValueStore>(
    engine: &Engine<S>,
    email: &str,
    password: &str,
) -> Result<()> {
    let email = engine.auth().login(email, password).await?;
    tracing::info!("Logged in as {email}");
    Ok(())
}

/// End the session.
pub async fn logout<S: KeyValueStore>(engine: &Engine<S>) -> Result<()> {
    engine.auth().logout().await?;
    tracing::info!("Logged out");
    Ok(())
}

/// Print the logged-in account, if any.
pub async fn whoami<S: KeyValueStore>(engine: &Engine<S>) -> Result<()> {
    match engine.auth().current_user().await? {
        Some(email) => tracing::info!("Logged in as {email}"),
        None => tracing::info!("Not logged in"),
    }
    Ok(())
}
