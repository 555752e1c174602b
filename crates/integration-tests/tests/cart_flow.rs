//! End-to-end cart behavior over the public service API.

#![allow(clippy::unwrap_used)]

use brewline_core::{Money, ProductId, Size};
use brewline_engine::{KeyValueStore, keys};
use brewline_integration_tests::{TestContext, cappuccino, espresso, latte, line};

// ============================================================================
// Line merging
// ============================================================================

#[tokio::test]
async fn test_same_product_same_size_merges_into_one_line() {
    let ctx = TestContext::new();
    let cart = ctx.engine.cart();

    cart.add_or_increment(line(&latte(), Some(Size::Medium), 1))
        .await
        .unwrap();
    let updated = cart
        .add_or_increment(line(&latte(), Some(Size::Medium), 2))
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(updated.lines()[0].quantity, 3);
}

#[tokio::test]
async fn test_same_product_different_size_stays_separate() {
    let ctx = TestContext::new();
    let cart = ctx.engine.cart();

    cart.add_or_increment(line(&latte(), Some(Size::Small), 1))
        .await
        .unwrap();
    let updated = cart
        .add_or_increment(line(&latte(), Some(Size::Large), 1))
        .await
        .unwrap();

    assert_eq!(updated.len(), 2);
}

// ============================================================================
// Quantity edits
// ============================================================================

#[tokio::test]
async fn test_decrease_never_drops_below_one() {
    let ctx = TestContext::new();
    let cart = ctx.engine.cart();
    cart.add_or_increment(line(&espresso(), None, 1)).await.unwrap();

    let updated = cart
        .change_quantity(ProductId::new(3), None, -5)
        .await
        .unwrap();
    assert_eq!(updated.lines()[0].quantity, 1);

    // Removal is explicit, never a side effect of decrementing.
    let removed = cart.remove_line(ProductId::new(3), None).await.unwrap();
    assert!(removed.is_empty());
}

#[tokio::test]
async fn test_total_tracks_every_edit() {
    let ctx = TestContext::new();
    let cart = ctx.engine.cart();

    // 2 x 4.20 + 1 x 2.50 = 10.90
    cart.add_or_increment(line(&cappuccino(), None, 2)).await.unwrap();
    cart.add_or_increment(line(&espresso(), None, 1)).await.unwrap();
    assert_eq!(cart.total().await.unwrap(), Money::parse_loose("10.90"));

    // +1 espresso -> 13.40
    cart.change_quantity(ProductId::new(3), None, 1).await.unwrap();
    assert_eq!(cart.total().await.unwrap(), Money::parse_loose("13.40"));

    cart.remove_line(ProductId::new(1), None).await.unwrap();
    assert_eq!(cart.total().await.unwrap(), Money::parse_loose("5.00"));
}

// ============================================================================
// Persisted representation
// ============================================================================

#[tokio::test]
async fn test_cart_persists_as_json_array_with_string_total() {
    let ctx = TestContext::new();
    ctx.engine
        .cart()
        .add_or_increment(line(&latte(), Some(Size::Large), 2))
        .await
        .unwrap();

    let raw = ctx.engine.store().get(keys::CART).await.unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let lines = parsed.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["size"], "L");
    assert_eq!(lines[0]["quantity"], 2);

    let total = ctx
        .engine
        .store()
        .get(keys::TOTAL_PRICE)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(Money::parse_loose(&total), Money::parse_loose("7.60"));
}

#[tokio::test]
async fn test_cart_written_by_an_older_version_still_loads() {
    let ctx = TestContext::new();
    // Quantity and size omitted, price as a bare JSON number.
    ctx.engine
        .store()
        .set(
            keys::CART,
            r#"[{"id": 7, "name": "Mocha", "price": 5.5, "category": "Coffee"}]"#,
        )
        .await
        .unwrap();

    let cart = ctx.engine.cart().load().await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 1);
    assert_eq!(cart.lines()[0].size, None);
    assert_eq!(cart.total(), Money::parse_loose("5.50"));
}
