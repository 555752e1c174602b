//! Wallet subcommands.

use brewline_core::Money;
use brewline_engine::{Engine, KeyValueStore, Result};

/// Print the current balance.
pub async fn show<S: KeyValueStore>(engine: &Engine<S>) -> Result<()> {
    let balance = engine.wallet().balance().await?;
    tracing::info!("Wallet balance: {balance}");
    Ok(())
}

/// Add funds to the wallet.
pub async fn top_up<S: KeyValueStore>(engine: &Engine<S>, amount: &str) -> Result<()> {
    let balance = engine.wallet().add_funds(Money::parse_loose(amount)).await?;
    tracing::info!("Wallet balance is now {balance}");
    Ok(())
}
