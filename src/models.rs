use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{validate_price, validate_participants};

/// Represents a menu item offered by the coffee shop
///
/// Catalog data is read-mostly: it is created by a backend fetch or by the
/// built-in defaults and is never mutated by the cart. Stock is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CatalogItem {
    pub id: i32,
    #[validate(length(min = 1, message = "Item name must not be empty"))]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_price")]
    pub price: Decimal,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0, message = "Sustainability rating must be between 0 and 5"))]
    pub sustainability_rating: f64,
    #[serde(default)]
    pub fair_trade: bool,
    #[serde(default)]
    pub organic: bool,
    #[serde(default)]
    pub description: String,
}

impl CatalogItem {
    /// Whether the item can currently be added to a cart
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

/// Represents a café location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cafe {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub wifi_available: bool,
    #[serde(default)]
    pub parking_available: bool,
    #[serde(default)]
    pub open_mic_nights: bool,
    #[serde(default)]
    pub coworking_friendly: bool,
    #[serde(default)]
    pub is_24_hours: bool,
}

/// Represents a bookable event hosted at a café
///
/// `current_participants` never exceeds `max_participants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_event_capacity"))]
pub struct Event {
    pub id: i32,
    #[validate(length(min = 1, message = "Event title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_price")]
    pub price: Decimal,
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
}

impl Event {
    /// Whether the event is fully booked
    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }

    /// Seats still available
    pub fn seats_left(&self) -> u32 {
        self.max_participants.saturating_sub(self.current_participants)
    }
}

fn validate_event_capacity(event: &Event) -> Result<(), ValidationError> {
    validate_participants(event.current_participants, event.max_participants)
}

/// Represents a promotional offer
///
/// Promotions are reference data: the promotion validator reads them, nothing
/// in the core mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,
    /// Informational only, never enforced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}
