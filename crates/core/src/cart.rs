//! Cart line items and the pure ledger operations over them.
//!
//! Every operation here is a total function over in-memory data; persistence
//! and error surfacing happen in the engine crate. The merge key for cart
//! lines is `(id, size)` - the same drink in two sizes is two lines. Older
//! app versions sometimes merged on `id` alone; `(id, size)` is the stricter
//! rule and is the one enforced everywhere now.

use serde::{Deserialize, Serialize};

use crate::types::{Money, ProductId, Size};

/// A product as presented in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One distinct product+variant entry in a cart, with its own quantity.
///
/// Field names match the JSON the app has always written under the `cart`
/// key, so previously persisted carts deserialize unchanged. `price` accepts
/// both formatted strings and numbers (see [`Money`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

impl LineItem {
    /// Build a line item from a catalog product.
    ///
    /// A `quantity` of zero is treated as one; a line never exists with
    /// quantity below one.
    #[must_use]
    pub fn from_product(product: &Product, size: Option<Size>, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            size,
            quantity: quantity.max(1),
            image: product.image.clone(),
        }
    }

    /// Whether this line is the one identified by `(id, size)`.
    #[must_use]
    pub fn matches(&self, id: ProductId, size: Option<Size>) -> bool {
        self.id == id && self.size == size
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// An ordered sequence of line items, insertion order preserved for display.
///
/// Invariant: the pair `(id, size)` is unique within a cart. All mutation
/// goes through the methods below, which maintain that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add an item, merging by `(id, size)`.
    ///
    /// If a line with the same `(id, size)` exists its quantity is
    /// incremented by the incoming quantity; otherwise the item is appended
    /// as a new line. An incoming quantity of zero counts as one.
    pub fn add_or_increment(&mut self, item: LineItem) {
        let quantity = item.quantity.max(1);
        match self
            .lines
            .iter_mut()
            .find(|l| l.matches(item.id, item.size))
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.lines.push(LineItem { quantity, ..item }),
        }
    }

    /// Adjust a line's quantity by `delta`, clamped so it never drops
    /// below one.
    ///
    /// Decrementing a quantity-1 line leaves it at 1; removal is a separate,
    /// explicit action. A missing line is a no-op.
    pub fn change_quantity(&mut self, id: ProductId, size: Option<Size>, delta: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(id, size)) {
            let adjusted = i64::from(line.quantity) + i64::from(delta);
            line.quantity = u32::try_from(adjusted.max(1)).unwrap_or(u32::MAX);
        }
    }

    /// Delete the line matching `(id, size)`. A missing line is a no-op.
    pub fn remove_line(&mut self, id: ProductId, size: Option<Size>) {
        self.lines.retain(|l| !l.matches(id, size));
    }

    /// Sum of `price * quantity` over all lines, unrounded.
    ///
    /// Returns zero for an empty cart. Display rounding to 2 decimal places
    /// is the caller's concern; keeping the exact value here avoids
    /// compounding rounding error across repeated top-up/checkout cycles.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::ZERO, |sum, line| sum + line.line_total())
    }
}

/// A checkout-time order summary.
///
/// Ephemeral: created when the user confirms a purchase, destroyed once
/// settlement completes. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub product: Product,
    pub size: Option<Size>,
    pub quantity: u32,
    pub total: Money,
}

impl Order {
    /// Build an order for `quantity` units of `product`.
    #[must_use]
    pub fn new(product: Product, size: Option<Size>, quantity: u32) -> Self {
        let quantity = quantity.max(1);
        let total = product.price * quantity;
        Self {
            product,
            size,
            quantity,
            total,
        }
    }
}
