//! Cart subcommands.

use brewline_core::{LineItem, Money, Product, ProductId, Size};
use brewline_engine::{Engine, KeyValueStore, Result};

/// Print the cart lines and total.
pub async fn show<S: KeyValueStore>(engine: &Engine<S>) -> Result<()> {
    let cart = engine.cart().load().await?;
    if cart.is_empty() {
        tracing::info!("Cart is empty");
        return Ok(());
    }
    for line in cart.lines() {
        let size = line.size.map_or_else(String::new, |s| format!(" ({s})"));
        tracing::info!(
            "  #{} {}{} x{} @ {} = {}",
            line.id,
            line.name,
            size,
            line.quantity,
            line.price,
            line.line_total()
        );
    }
    tracing::info!("Total: {}", cart.total());
    Ok(())
}

/// Add an item to the cart, merging with an existing matching line.
pub async fn add<S: KeyValueStore>(
    engine: &Engine<S>,
    id: i64,
    name: &str,
    price: &str,
    size: Option<Size>,
    quantity: u32,
    category: String,
) -> Result<()> {
    let product = Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Money::parse_loose(price),
        category,
        image: None,
        description: None,
    };
    let cart = engine
        .cart()
        .add_or_increment(LineItem::from_product(&product, size, quantity))
        .await?;
    tracing::info!("Added {name}; cart total is now {}", cart.total());
    Ok(())
}

/// Bump a line's quantity up or down.
pub async fn change_quantity<S: KeyValueStore>(
    engine: &Engine<S>,
    id: i64,
    size: Option<Size>,
    delta: i32,
) -> Result<()> {
    let cart = engine
        .cart()
        .change_quantity(ProductId::new(id), size, delta)
        .await?;
    tracing::info!("Cart total is now {}", cart.total());
    Ok(())
}

/// Remove a line from the cart.
pub async fn remove<S: KeyValueStore>(
    engine: &Engine<S>,
    id: i64,
    size: Option<Size>,
) -> Result<()> {
    let cart = engine.cart().remove_line(ProductId::new(id), size).await?;
    tracing::info!("Removed; cart total is now {}", cart.total());
    Ok(())
}
