use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Notice;
use crate::models::Event;

/// Confirmation of one seat booked at an event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: Uuid,
    pub event_id: i32,
    pub title: String,
    pub date: String,
    pub time: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub booked_at: DateTime<Utc>,
}

impl BookingConfirmation {
    pub(crate) fn for_event(event: &Event) -> Self {
        Self {
            booking_id: Uuid::new_v4(),
            event_id: event.id,
            title: event.title.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            price: event.price,
            booked_at: Utc::now(),
        }
    }

    pub fn notice(&self) -> Notice {
        Notice::success(format!(
            "Booked: {} on {} at {} (${:.2})",
            self.title, self.date, self.time, self.price
        ))
    }
}
