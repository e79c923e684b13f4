use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::cart::CartEntry;
use crate::orders::LoyaltyCalculator;

/// Order status as reported by the backend or assigned locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label ("Preparing")
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Case-insensitive: the backend sends "pending", local orders use "Preparing"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// How the customer receives the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Pickup,
    Delivery,
    DineIn,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Pickup => "pickup",
            OrderType::Delivery => "delivery",
            OrderType::DineIn => "dine_in",
        }
    }
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::Pickup
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pickup" => Ok(OrderType::Pickup),
            "delivery" => Ok(OrderType::Delivery),
            "dine_in" => Ok(OrderType::DineIn),
            _ => Err(format!("Invalid order type: {}", s)),
        }
    }
}

/// Identifier of an order
///
/// Local orders are numbered by sequence. Backends may answer with either a
/// number or a string (usually a UUID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(u64),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Number(n) => write!(f, "{}", n),
            OrderId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Where the order of record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    Remote,
    Local,
}

/// Item line frozen at the time the order was placed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub item_id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

impl From<&CartEntry> for OrderLine {
    fn from(entry: &CartEntry) -> Self {
        Self {
            item_id: entry.item_id,
            name: entry.name.clone(),
            price: entry.price,
            quantity: entry.quantity,
            subtotal: entry.subtotal(),
        }
    }
}

/// A placed order
///
/// Orders are never modified once recorded; the history only hands out shared
/// references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub placed_at: DateTime<Utc>,
    pub loyalty_points_earned: u32,
    pub source: OrderSource,
}

impl Order {
    /// Build an order recorded on this device
    pub fn local(
        sequence: u64,
        items: Vec<OrderLine>,
        total: Decimal,
        order_type: OrderType,
    ) -> Self {
        Self {
            id: OrderId::Number(sequence),
            items,
            total,
            status: OrderStatus::Preparing,
            order_type,
            placed_at: Utc::now(),
            loyalty_points_earned: LoyaltyCalculator::points_for(total),
            source: OrderSource::Local,
        }
    }

    /// Adopt the order the backend created
    ///
    /// Id, status and total come from the backend; a missing total falls back
    /// to the total that was submitted. Lines stay as snapshotted locally.
    pub fn from_remote(
        remote: RemoteOrder,
        items: Vec<OrderLine>,
        submitted_total: Decimal,
        order_type: OrderType,
    ) -> Self {
        let total = remote.total.unwrap_or(submitted_total);
        let placed_at = remote
            .created_at
            .as_deref()
            .and_then(parse_backend_timestamp)
            .unwrap_or_else(Utc::now);

        Self {
            id: remote.id,
            items,
            total,
            status: remote.status.unwrap_or_default(),
            order_type,
            placed_at,
            loyalty_points_earned: LoyaltyCalculator::points_for(total),
            source: OrderSource::Remote,
        }
    }
}

/// Parse the backend's timestamps: RFC 3339, or naive ISO 8601 taken as UTC
pub fn parse_backend_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Line of the `POST /orders` body
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemRequest {
    pub id: i32,
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub quantity: u32,
}

impl From<&OrderLine> for OrderItemRequest {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.item_id,
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
        }
    }
}

/// Body of `POST /orders`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    pub items: Vec<OrderItemRequest>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
    pub order_type: OrderType,
    pub user_id: i32,
}

impl CreateOrderRequest {
    pub fn new(lines: &[OrderLine], total: Decimal, order_type: OrderType, user_id: i32) -> Self {
        Self {
            items: lines.iter().map(OrderItemRequest::from).collect(),
            total,
            order_type,
            user_id,
        }
    }
}

/// Order as returned by `POST /orders`, after envelope normalization
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteOrder {
    pub id: OrderId,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lines() -> Vec<OrderLine> {
        vec![
            OrderLine {
                item_id: 1,
                name: "Espresso".to_string(),
                price: dec!(2.50),
                quantity: 2,
                subtotal: dec!(5.00),
            },
            OrderLine {
                item_id: 3,
                name: "Latte".to_string(),
                price: dec!(4.00),
                quantity: 1,
                subtotal: dec!(4.00),
            },
        ]
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("Preparing".parse::<OrderStatus>().unwrap(), OrderStatus::Preparing);
        assert_eq!("COMPLETED".parse::<OrderStatus>().unwrap(), OrderStatus::Completed);
        assert!("brewing".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_display_and_serialization() {
        assert_eq!(OrderStatus::Preparing.to_string(), "Preparing");
        assert_eq!(serde_json::to_string(&OrderStatus::Preparing).unwrap(), "\"preparing\"");
    }

    #[test]
    fn test_order_type_parsing() {
        assert_eq!("pickup".parse::<OrderType>().unwrap(), OrderType::Pickup);
        assert_eq!("dine-in".parse::<OrderType>().unwrap(), OrderType::DineIn);
        assert!("drone".parse::<OrderType>().is_err());
    }

    #[test]
    fn test_order_id_accepts_numbers_and_strings() {
        let numeric: OrderId = serde_json::from_str("7").unwrap();
        let text: OrderId = serde_json::from_str("\"4b8e-11\"").unwrap();
        assert_eq!(numeric, OrderId::Number(7));
        assert_eq!(text, OrderId::Text("4b8e-11".to_string()));
        assert_eq!(text.to_string(), "4b8e-11");
    }

    #[test]
    fn test_local_order_defaults() {
        let order = Order::local(1, lines(), dec!(9.00), OrderType::Pickup);

        assert_eq!(order.id, OrderId::Number(1));
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.loyalty_points_earned, 9);
        assert_eq!(order.source, OrderSource::Local);
    }

    #[test]
    fn test_order_serializes_money_as_numbers() {
        let order = Order::local(1, lines(), dec!(9.00), OrderType::Pickup);

        let json = serde_json::to_value(&order).expect("Failed to serialize Order");

        assert_eq!(json["total"], serde_json::json!(9.0));
        assert_eq!(json["items"][0]["price"], serde_json::json!(2.5));
        assert_eq!(json["items"][0]["subtotal"], serde_json::json!(5.0));
    }

    #[test]
    fn test_remote_order_adopts_backend_fields() {
        let remote: RemoteOrder = serde_json::from_str(
            r#"{"id": "abc-123", "total": 9.5, "status": "pending", "created_at": "2024-01-15T10:30:00.123456"}"#,
        )
        .unwrap();

        let order = Order::from_remote(remote, lines(), dec!(9.00), OrderType::Pickup);

        assert_eq!(order.id, OrderId::Text("abc-123".to_string()));
        assert_eq!(order.total, dec!(9.5));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.loyalty_points_earned, 9);
        assert_eq!(order.source, OrderSource::Remote);
        assert_eq!(order.placed_at.to_rfc3339(), "2024-01-15T10:30:00.123456+00:00");
    }

    #[test]
    fn test_remote_order_without_total_keeps_submitted_total() {
        let remote: RemoteOrder = serde_json::from_str(r#"{"id": 42}"#).unwrap();

        let order = Order::from_remote(remote, lines(), dec!(9.00), OrderType::Delivery);

        assert_eq!(order.total, dec!(9.00));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.order_type, OrderType::Delivery);
    }

    #[test]
    fn test_parse_backend_timestamp_formats() {
        assert!(parse_backend_timestamp("2024-01-15T10:30:00Z").is_some());
        assert!(parse_backend_timestamp("2024-01-15T10:30:00").is_some());
        assert!(parse_backend_timestamp("last tuesday").is_none());
    }

    #[test]
    fn test_create_order_request_wire_shape() {
        let request = CreateOrderRequest::new(&lines(), dec!(9.00), OrderType::Pickup, 1);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["total"], serde_json::json!(9.0));
        assert_eq!(body["order_type"], "pickup");
        assert_eq!(body["user_id"], 1);
        assert_eq!(body["items"][0]["id"], 1);
        assert_eq!(body["items"][0]["price"], serde_json::json!(2.5));
        assert_eq!(body["items"][0]["quantity"], 2);
    }

    #[test]
    fn test_create_order_request_validation() {
        let request = CreateOrderRequest::new(&lines(), dec!(9.00), OrderType::Pickup, 1);
        assert!(request.validate().is_ok());

        let empty = CreateOrderRequest::new(&[], Decimal::ZERO, OrderType::Pickup, 1);
        assert!(empty.validate().is_err());
    }
}
