//! End-to-end settlement behavior, including crash recovery.

#![allow(clippy::unwrap_used)]

use brewline_core::{Money, Product, ProductId, SettlementState};
use brewline_engine::{EngineError, KeyValueStore, ValidationError, keys};
use brewline_integration_tests::{TestContext, line};

fn priced(price: &str) -> Product {
    Product {
        id: ProductId::new(10),
        name: "Cold Brew".to_string(),
        price: Money::parse_loose(price),
        category: "Coffee".to_string(),
        image: None,
        description: None,
    }
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_settlement_debits_wallet_and_clears_cart() {
    let ctx = TestContext::with_balance("200").await;
    ctx.engine
        .cart()
        .add_or_increment(line(&priced("150"), None, 1))
        .await
        .unwrap();

    let quote = ctx.engine.checkout().begin().await.unwrap();
    assert_eq!(quote.total, Money::parse_loose("150"));

    let receipt = ctx.engine.checkout().confirm(quote).await.unwrap();
    assert_eq!(receipt.state, SettlementState::Settled);
    assert_eq!(receipt.balance_after, Money::parse_loose("50"));

    assert_eq!(
        ctx.engine.wallet().balance().await.unwrap(),
        Money::parse_loose("50")
    );
    assert!(ctx.engine.cart().load().await.unwrap().is_empty());
    assert_eq!(
        ctx.engine
            .store()
            .get(keys::TOTAL_PRICE)
            .await
            .unwrap()
            .unwrap(),
        "0"
    );
    assert_eq!(ctx.engine.store().get(keys::SETTLEMENT).await.unwrap(), None);
}

#[tokio::test]
async fn test_top_up_then_settle() {
    let ctx = TestContext::with_balance("100").await;
    ctx.engine
        .cart()
        .add_or_increment(line(&priced("150"), None, 1))
        .await
        .unwrap();

    // 100 is not enough for 150; top up 75, then it is.
    let quote = ctx.engine.checkout().begin().await.unwrap();
    let err = ctx.engine.checkout().confirm(quote).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::InsufficientFunds { .. })
    ));

    ctx.engine
        .wallet()
        .add_funds(Money::parse_loose("75"))
        .await
        .unwrap();
    let quote = ctx.engine.checkout().begin().await.unwrap();
    let receipt = ctx.engine.checkout().confirm(quote).await.unwrap();
    assert_eq!(receipt.balance_after, Money::parse_loose("25"));
}

// ============================================================================
// Rejections leave state untouched
// ============================================================================

#[tokio::test]
async fn test_empty_cart_cannot_be_quoted() {
    let ctx = TestContext::with_balance("200").await;
    let err = ctx.engine.checkout().begin().await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::EmptyCart)
    ));
}

#[tokio::test]
async fn test_cancelled_quote_charges_nothing() {
    let ctx = TestContext::with_balance("200").await;
    ctx.engine
        .cart()
        .add_or_increment(line(&priced("150"), None, 1))
        .await
        .unwrap();

    let quote = ctx.engine.checkout().begin().await.unwrap();
    assert_eq!(ctx.engine.checkout().cancel(quote), SettlementState::Aborted);

    assert_eq!(
        ctx.engine.wallet().balance().await.unwrap(),
        Money::parse_loose("200")
    );
    assert_eq!(ctx.engine.cart().load().await.unwrap().len(), 1);
}

// ============================================================================
// Crash recovery
// ============================================================================

/// Journal as [`brewline_engine::checkout::CheckoutService::confirm`] persists
/// it right before the debit.
fn journal(total: &str, balance_before: &str) -> String {
    serde_json::json!({
        "attempt_id": "7b1c3a52-90d4-4f38-9b0a-2f8f3f6f0c11",
        "total": total,
        "balance_before": balance_before,
        "state": "settling",
    })
    .to_string()
}

#[tokio::test]
async fn test_recover_finishes_an_interrupted_settlement() {
    // Journal present, debit not yet applied: the crash happened right after
    // the journal write.
    let ctx = TestContext::with_balance("200").await;
    ctx.engine
        .cart()
        .add_or_increment(line(&priced("150"), None, 1))
        .await
        .unwrap();
    ctx.engine
        .store()
        .set(keys::SETTLEMENT, &journal("150", "200"))
        .await
        .unwrap();

    let receipt = ctx.engine.checkout().recover().await.unwrap().unwrap();
    assert_eq!(receipt.balance_after, Money::parse_loose("50"));
    assert!(ctx.engine.cart().load().await.unwrap().is_empty());

    // A second recovery pass finds nothing to do.
    assert!(ctx.engine.checkout().recover().await.unwrap().is_none());
    assert_eq!(
        ctx.engine.wallet().balance().await.unwrap(),
        Money::parse_loose("50")
    );
}

#[tokio::test]
async fn test_recover_after_debit_does_not_charge_twice() {
    // Balance already reflects the debit; only the cart clear is outstanding.
    let ctx = TestContext::with_balance("50").await;
    ctx.engine
        .cart()
        .add_or_increment(line(&priced("150"), None, 1))
        .await
        .unwrap();
    ctx.engine
        .store()
        .set(keys::SETTLEMENT, &journal("150", "200"))
        .await
        .unwrap();

    let receipt = ctx.engine.checkout().recover().await.unwrap().unwrap();
    assert_eq!(receipt.balance_after, Money::parse_loose("50"));
    assert_eq!(
        ctx.engine.wallet().balance().await.unwrap(),
        Money::parse_loose("50")
    );
    assert!(ctx.engine.cart().load().await.unwrap().is_empty());
}
