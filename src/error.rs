// Error handling for the storefront
// Aggregates the domain errors and converts them into user-facing notices

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::api::TransportError;
use crate::bookings::BookingError;
use crate::cart::CartError;
use crate::catalog::MenuQueryError;
use crate::config::ConfigError;
use crate::orders::OrderError;
use crate::promotions::PromotionError;

/// Main error type for the storefront
///
/// Every fallible storefront call returns `Result<T, StorefrontError>`; each
/// variant wraps the error of the component that failed.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Promotion(#[from] PromotionError),

    #[error(transparent)]
    MenuQuery(#[from] MenuQueryError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Message shown to the user after an action (toast or alert)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

impl StorefrontError {
    /// Convert the error into the notice shown to the user
    ///
    /// Logs at a level matching the condition:
    /// - debug!: expected user conditions (out of stock, unknown code)
    /// - warn!: refusals the user may want to act on (full event, rejected order)
    /// - error!: internal failures (configuration, transport, invariant breaks)
    pub fn to_notice(&self) -> Notice {
        match self {
            StorefrontError::Cart(CartError::OutOfStock { name, .. }) => {
                debug!("Out of stock: {}", name);
                Notice::warning(format!("{} is out of stock", name))
            }
            StorefrontError::Cart(CartError::ItemNotFound(item_id)) => {
                debug!("Unknown menu item: {}", item_id);
                Notice::warning("That item is no longer on the menu")
            }
            StorefrontError::Order(OrderError::Rejected { status, message }) => {
                warn!("Order rejected with HTTP {}: {}", status, message);
                Notice::error(format!("Order could not be placed: {}", message))
            }
            StorefrontError::Order(OrderError::ValidationError(message)) => {
                debug!("Order validation failed: {}", message);
                Notice::error(format!("Order could not be placed: {}", message))
            }
            StorefrontError::Order(OrderError::InvalidTransition(message)) => {
                error!("Order submission state error: {}", message);
                Notice::error("Order could not be placed, please try again")
            }
            StorefrontError::Booking(BookingError::EventNotFound(event_id)) => {
                debug!("Unknown event: {}", event_id);
                Notice::warning("That event is no longer available")
            }
            StorefrontError::Booking(BookingError::CapacityExceeded { title, .. }) => {
                warn!("Event fully booked: {}", title);
                Notice::warning(format!("Sorry, {} is fully booked", title))
            }
            StorefrontError::Promotion(PromotionError::InvalidCode(code)) => {
                debug!("Invalid promo code: {}", code);
                Notice::error("Invalid promo code")
            }
            StorefrontError::MenuQuery(err) => {
                debug!("Invalid menu query: {}", err);
                Notice::warning(err.to_string())
            }
            StorefrontError::Transport(err) => {
                error!("Backend error: {}", err);
                Notice::error("The coffee shop is unreachable right now")
            }
            StorefrontError::Config(err) => {
                error!("Configuration error: {}", err);
                Notice::error("The storefront is misconfigured")
            }
        }
    }
}
