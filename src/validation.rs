// Validation utilities module
// Provides custom validation functions for catalog data received from the backend

use rust_decimal::Decimal;
use validator::ValidationError;

/// Highest unit price accepted for menu items and events
pub const MAX_PRICE: i64 = 10_000;

/// Validates that a price lies between zero and MAX_PRICE
/// Zero is accepted (complimentary items, free events)
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        Err(ValidationError::new("price_must_not_be_negative"))
    } else if *price > Decimal::from(MAX_PRICE) {
        Err(ValidationError::new("price_too_high"))
    } else {
        Ok(())
    }
}

/// Validates that an event never reports more participants than seats
pub fn validate_participants(current: u32, max: u32) -> Result<(), ValidationError> {
    if current > max {
        Err(ValidationError::new("participants_exceed_capacity"))
    } else {
        Ok(())
    }
}
