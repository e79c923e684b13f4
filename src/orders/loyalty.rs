// Loyalty points
//
// One point per whole currency unit spent. Fractions are truncated, never rounded.
// The ledger only ever grows: points are credited when an order is recorded.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Converts order totals into loyalty points
pub struct LoyaltyCalculator;

impl LoyaltyCalculator {
    /// Points earned for an order total: floor(total), never negative
    pub fn points_for(total: Decimal) -> u32 {
        if total.is_sign_negative() {
            return 0;
        }
        total.floor().to_u32().unwrap_or(u32::MAX)
    }
}

/// A user's accumulated loyalty balance for the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoyaltyLedger {
    points: u64,
    orders_credited: u32,
}

impl LoyaltyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn orders_credited(&self) -> u32 {
        self.orders_credited
    }

    /// Credit the points earned by one recorded order
    ///
    /// # Returns
    /// The new balance
    pub(crate) fn credit(&mut self, points: u32) -> u64 {
        self.points = self.points.saturating_add(u64::from(points));
        self.orders_credited = self.orders_credited.saturating_add(1);
        self.points
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// points_for(total) == floor(total) for cent-denominated totals
    #[test]
    fn prop_points_equal_floor_of_total() {
        proptest!(|(cents in 0u64..=10_000_000u64)| {
            let total = Decimal::new(cents as i64, 2);
            prop_assert_eq!(LoyaltyCalculator::points_for(total) as u64, cents / 100);
        });
    }

    /// The balance never decreases
    #[test]
    fn prop_ledger_is_monotonic() {
        proptest!(|(credits in prop::collection::vec(0u32..=500, 0..30))| {
            let mut ledger = LoyaltyLedger::new();
            let mut previous = ledger.points();
            for points in credits {
                let balance = ledger.credit(points);
                prop_assert!(balance >= previous);
                previous = balance;
            }
        });
    }
}
