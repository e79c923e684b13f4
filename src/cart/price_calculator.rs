use rust_decimal::Decimal;

/// Decimal arithmetic for cart lines and order totals
pub struct PriceCalculator;

impl PriceCalculator {
    /// Calculate the subtotal of one cart line
    ///
    /// # Arguments
    /// * `quantity` - Number of units in the line
    /// * `unit_price` - Price captured when the item entered the cart
    ///
    /// # Returns
    /// `unit_price * quantity`, saturating at `Decimal::MAX`
    pub fn calculate_subtotal(quantity: u32, unit_price: Decimal) -> Decimal {
        Decimal::from(quantity)
            .checked_mul(unit_price)
            .unwrap_or(Decimal::MAX)
    }

    /// Calculate the total over a set of line subtotals, saturating at `Decimal::MAX`
    pub fn calculate_total<I>(subtotals: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        subtotals.into_iter().fold(Decimal::ZERO, |total, subtotal| {
            total.checked_add(subtotal).unwrap_or(Decimal::MAX)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_subtotal_two_espressos() {
        assert_eq!(PriceCalculator::calculate_subtotal(2, dec!(2.50)), dec!(5.00));
    }

    #[test]
    fn test_subtotal_keeps_cents_exact() {
        assert_eq!(PriceCalculator::calculate_subtotal(3, dec!(4.33)), dec!(12.99));
    }

    #[test]
    fn test_total_of_mixed_lines() {
        let total = PriceCalculator::calculate_total(vec![dec!(5.00), dec!(4.00)]);
        assert_eq!(total, dec!(9.00));
    }

    #[test]
    fn test_overflow_saturates_instead_of_panicking() {
        let huge = dec!(100000000000000000000);
        assert_eq!(PriceCalculator::calculate_subtotal(u32::MAX, huge), Decimal::MAX);
        assert_eq!(
            PriceCalculator::calculate_total(vec![Decimal::MAX, dec!(1)]),
            Decimal::MAX
        );
    }

    #[test]
    fn test_total_of_nothing_is_zero() {
        let total = PriceCalculator::calculate_total(Vec::<Decimal>::new());
        assert_eq!(total, Decimal::ZERO);
    }
}
