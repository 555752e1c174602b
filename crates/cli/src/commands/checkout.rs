//! Checkout subcommand.

use brewline_engine::{Engine, KeyValueStore, Result};

/// Quote the cart and, with `yes`, settle it against the wallet.
pub async fn run<S: KeyValueStore>(engine: &Engine<S>, yes: bool) -> Result<()> {
    let checkout = engine.checkout();
    let quote = checkout.begin().await?;

    if !yes {
        tracing::info!(
            "Cart total is {}; re-run with --yes to settle. Nothing was charged.",
            quote.total
        );
        checkout.cancel(quote);
        return Ok(());
    }

    let receipt = checkout.confirm(quote).await?;
    engine
        .notifications()
        .push(format!("Order placed for {}", receipt.total))
        .await?;
    tracing::info!(
        "Settled {}; wallet balance is now {}",
        receipt.total,
        receipt.balance_after
    );
    Ok(())
}
