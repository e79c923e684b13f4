use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::PriceCalculator;
use crate::models::CatalogItem;

/// One line of the cart
///
/// Refers to its catalog item by id only. Name and price are captured when the
/// item is first added so later catalog changes do not move the cart total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry {
    pub item_id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl CartEntry {
    /// Create a fresh entry with quantity 1
    pub fn from_item(item: &CatalogItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
        }
    }

    /// price * quantity for this line
    pub fn subtotal(&self) -> Decimal {
        PriceCalculator::calculate_subtotal(self.quantity, self.price)
    }
}

/// Owned view of the cart handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub entries: Vec<CartEntry>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Sum of quantities over all entries
    pub item_count: u32,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
