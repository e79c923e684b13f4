pub mod api;
pub mod bookings;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod orders;
pub mod promotions;
pub mod session;
pub mod storefront;
pub mod validation;

pub use config::StorefrontConfig;
pub use error::{Notice, NoticeLevel, StorefrontError};
pub use storefront::{SessionSummary, Storefront};
