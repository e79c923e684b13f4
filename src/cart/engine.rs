use rust_decimal::Decimal;

use crate::cart::{CartEntry, CartError, CartSnapshot, PriceCalculator};
use crate::models::CatalogItem;

/// Largest quantity a single cart line can hold
pub const MAX_LINE_QUANTITY: u32 = 999;

/// The in-progress selection of items for the current session
///
/// Invariants held by every operation:
/// - at most one entry per item id
/// - every entry has 1 <= quantity <= MAX_LINE_QUANTITY
///
/// Entries keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Quantity held for an item, if it is in the cart
    pub fn quantity_of(&self, item_id: i32) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.item_id == item_id)
            .map(|entry| entry.quantity)
    }

    /// Add one unit of a catalog item
    ///
    /// Items with no stock are refused and the cart is left unchanged. Stock is
    /// not reserved and is not re-checked when an existing line is incremented.
    /// A line already at `MAX_LINE_QUANTITY` stays there.
    ///
    /// # Returns
    /// The line's quantity after the add
    pub fn add_item(&mut self, item: &CatalogItem) -> Result<u32, CartError> {
        if !item.in_stock() {
            tracing::debug!("Refusing to add out-of-stock item {} ({})", item.id, item.name);
            return Err(CartError::OutOfStock {
                item_id: item.id,
                name: item.name.clone(),
            });
        }

        let quantity = match self.entries.iter_mut().find(|entry| entry.item_id == item.id) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
                entry.quantity
            }
            None => {
                self.entries.push(CartEntry::from_item(item));
                1
            }
        };

        tracing::debug!("Added {} to cart, quantity now {}", item.name, quantity);
        Ok(quantity)
    }

    /// Remove an item's line; absent ids are ignored
    ///
    /// # Returns
    /// Whether a line was removed
    pub fn remove_item(&mut self, item_id: i32) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.item_id != item_id);
        let removed = self.entries.len() != before;
        if removed {
            tracing::debug!("Removed item {} from cart", item_id);
        }
        removed
    }

    /// Overwrite a line's quantity
    ///
    /// A quantity of zero or below removes the line; anything above
    /// `MAX_LINE_QUANTITY` is clamped to it. Absent ids are ignored.
    pub fn set_quantity(&mut self, item_id: i32, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(item_id);
            return;
        }

        let quantity = u32::try_from(quantity)
            .unwrap_or(u32::MAX)
            .min(MAX_LINE_QUANTITY);
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.item_id == item_id) {
            entry.quantity = quantity;
            tracing::debug!("Set quantity of item {} to {}", item_id, quantity);
        }
    }

    /// Sum of price * quantity over the current entries
    pub fn total(&self) -> Decimal {
        PriceCalculator::calculate_total(self.entries.iter().map(CartEntry::subtotal))
    }

    /// Sum of quantities over all entries
    pub fn item_count(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |count, entry| count.saturating_add(entry.quantity))
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            entries: self.entries.clone(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }

    /// Empty the cart
    ///
    /// Only the order service calls this, after an order has been recorded.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    pub(crate) fn item(id: i32, price: Decimal, stock: u32) -> CatalogItem {
        CatalogItem {
            id,
            name: format!("Item {}", id),
            price,
            stock_quantity: stock,
            category: "Coffee".to_string(),
            sustainability_rating: 4.0,
            fair_trade: false,
            organic: false,
            description: String::new(),
        }
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut cart = Cart::new();
        let espresso = item(1, dec!(2.50), 50);

        assert_eq!(cart.add_item(&espresso), Ok(1));
        assert_eq!(cart.add_item(&espresso), Ok(2));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(1), Some(2));
    }

    #[test]
    fn test_add_out_of_stock_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, dec!(2.50), 5)).unwrap();
        let before = cart.snapshot();

        let result = cart.add_item(&item(2, dec!(3.00), 0));

        assert!(matches!(result, Err(CartError::OutOfStock { item_id: 2, .. })));
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_add_beyond_stock_is_allowed() {
        // Stock is informational; increments are not re-validated
        let mut cart = Cart::new();
        let croissant = item(4, dec!(2.00), 1);
        cart.add_item(&croissant).unwrap();
        assert_eq!(cart.add_item(&croissant), Ok(2));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, dec!(2.50), 5)).unwrap();

        assert!(!cart.remove_item(99));
        assert!(cart.remove_item(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, dec!(2.50), 5)).unwrap();

        cart.set_quantity(1, 4);
        assert_eq!(cart.quantity_of(1), Some(4));
    }

    #[test]
    fn test_set_quantity_clamps_to_line_maximum() {
        let mut cart = Cart::new();
        let espresso = item(1, dec!(2.50), 5);
        cart.add_item(&espresso).unwrap();

        cart.set_quantity(1, 1_000_000_000);
        assert_eq!(cart.quantity_of(1), Some(MAX_LINE_QUANTITY));
        assert_eq!(cart.add_item(&espresso), Ok(MAX_LINE_QUANTITY));
        assert_eq!(cart.total(), dec!(2497.50));
    }

    #[test]
    fn test_huge_price_does_not_panic_total() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, dec!(100000000000000000000), 1)).unwrap();
        cart.set_quantity(1, 1_000_000_000);
        assert_eq!(cart.total(), dec!(99900000000000000000000));

        cart.add_item(&item(2, Decimal::MAX, 1)).unwrap();
        cart.set_quantity(2, i64::MAX);
        assert_eq!(cart.total(), Decimal::MAX);
        assert_eq!(cart.snapshot().total, Decimal::MAX);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, dec!(2.50), 5)).unwrap();
        cart.add_item(&item(2, dec!(3.50), 5)).unwrap();

        cart.set_quantity(1, 0);
        cart.set_quantity(2, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.set_quantity(7, 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_uses_captured_price() {
        let mut cart = Cart::new();
        let mut latte = item(3, dec!(4.00), 25);
        cart.add_item(&latte).unwrap();

        // A later catalog price change does not reach the cart
        latte.price = dec!(9.99);
        cart.add_item(&latte).unwrap();

        assert_eq!(cart.total(), dec!(8.00));
    }

    #[test]
    fn test_total_matches_example_cart() {
        let mut cart = Cart::new();
        let espresso = item(1, dec!(2.50), 50);
        cart.add_item(&espresso).unwrap();
        cart.add_item(&espresso).unwrap();
        cart.add_item(&item(3, dec!(4.00), 25)).unwrap();

        assert_eq!(cart.total(), dec!(9.00));
        assert_eq!(cart.total(), dec!(9.00));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&item(5, dec!(2.50), 20)).unwrap();
        cart.add_item(&item(1, dec!(2.50), 50)).unwrap();
        cart.add_item(&item(5, dec!(2.50), 20)).unwrap();

        let ids: Vec<i32> = cart.snapshot().entries.iter().map(|e| e.item_id).collect();
        assert_eq!(ids, vec![5, 1]);
    }
}

#[cfg(test)]
mod property_tests {
    use super::tests::item;
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone)]
    enum Op {
        Add(i32, u32),
        Remove(i32),
        SetQuantity(i32, i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1i32..=6, 0u32..=3).prop_map(|(id, stock)| Op::Add(id, stock)),
            (1i32..=6).prop_map(Op::Remove),
            (1i32..=6, -3i64..=10).prop_map(|(id, qty)| Op::SetQuantity(id, qty)),
            (1i32..=6, 1_000i64..=i64::MAX).prop_map(|(id, qty)| Op::SetQuantity(id, qty)),
        ]
    }

    /// No duplicate ids and no non-positive quantities after any sequence of operations
    #[test]
    fn prop_cart_invariants_hold() {
        proptest!(|(ops in prop::collection::vec(op_strategy(), 0..60))| {
            let mut cart = Cart::new();
            for op in ops {
                match op {
                    Op::Add(id, stock) => {
                        let _ = cart.add_item(&item(id, Decimal::new(250, 2), stock));
                    }
                    Op::Remove(id) => {
                        cart.remove_item(id);
                    }
                    Op::SetQuantity(id, qty) => cart.set_quantity(id, qty),
                }

                let mut seen = HashSet::new();
                for entry in cart.entries() {
                    prop_assert!(seen.insert(entry.item_id), "duplicate entry for {}", entry.item_id);
                    prop_assert!(entry.quantity >= 1);
                    prop_assert!(entry.quantity <= MAX_LINE_QUANTITY);
                }
            }
        });
    }

    /// Adding a zero-stock item never changes the cart
    #[test]
    fn prop_zero_stock_add_is_noop() {
        proptest!(|(
            existing in prop::collection::vec(1i32..=5, 0..8),
            target in 1i32..=10
        )| {
            let mut cart = Cart::new();
            for id in existing {
                cart.add_item(&item(id, Decimal::new(300, 2), 10)).unwrap();
            }
            let before = cart.snapshot();
            let result = cart.add_item(&item(target, Decimal::new(300, 2), 0));
            let is_out_of_stock = matches!(result, Err(CartError::OutOfStock { .. }));
            prop_assert!(is_out_of_stock);
            prop_assert_eq!(cart.snapshot(), before);
        });
    }

    /// total() equals the sum of price * quantity and has no side effects
    #[test]
    fn prop_total_matches_entries() {
        proptest!(|(
            lines in prop::collection::vec((1i32..=20, 0u32..=2000u32, 1i64..=9), 0..10)
        )| {
            let mut cart = Cart::new();
            for (id, cents, qty) in lines {
                if cart.add_item(&item(id, Decimal::new(cents as i64, 2), 5)).is_ok() {
                    cart.set_quantity(id, qty);
                }
            }
            let expected: Decimal = cart
                .entries()
                .iter()
                .map(|e| e.price * Decimal::from(e.quantity))
                .sum();
            let before = cart.snapshot();
            prop_assert_eq!(cart.total(), expected);
            prop_assert_eq!(cart.total(), expected);
            prop_assert_eq!(cart.snapshot(), before);
        });
    }
}
