//! Integration tests for Brewline.
//!
//! Each test drives the full engine through the public service API over an
//! in-memory store, the same way the CLI does over the file store. Raw-key
//! assertions go through [`brewline_engine::Engine::store`] so the tests also
//! pin the persisted representation, not just the in-process view.
//!
//! Run with: `cargo test -p brewline-integration-tests`

#![cfg_attr(not(test), forbid(unsafe_code))]

use brewline_core::{LineItem, Money, Product, ProductId, Size};
use brewline_engine::store::MemoryStore;
use brewline_engine::{Engine, KeyValueStore};

/// A fresh engine plus a tiny product catalog.
pub struct TestContext {
    pub engine: Engine<MemoryStore>,
}

impl TestContext {
    /// Engine over an empty store; the wallet reads as the seed balance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: Engine::new(MemoryStore::new()),
        }
    }

    /// Engine whose wallet balance is pre-set to `balance`.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory store write fails, which it cannot.
    pub async fn with_balance(balance: &str) -> Self {
        let ctx = Self::new();
        ctx.engine
            .store()
            .set(brewline_engine::keys::WALLET_BALANCE, balance)
            .await
            .expect("memory store write");
        ctx
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// "Cappuccino", $4.20.
#[must_use]
pub fn cappuccino() -> Product {
    product(1, "Cappuccino", "$4.20")
}

/// "Latte", $3.80.
#[must_use]
pub fn latte() -> Product {
    product(2, "Latte", "$3.80")
}

/// "Espresso", $2.50.
#[must_use]
pub fn espresso() -> Product {
    product(3, "Espresso", "$2.50")
}

fn product(id: i64, name: &str, price: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Money::parse_loose(price),
        category: "Coffee".to_string(),
        image: None,
        description: None,
    }
}

/// Line item for `product` in `size` with `quantity` units.
#[must_use]
pub fn line(product: &Product, size: Option<Size>, quantity: u32) -> LineItem {
    LineItem::from_product(product, size, quantity)
}
