/// Error types for event booking
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Event not found: {0}")]
    EventNotFound(i32),

    #[error("Event '{title}' is fully booked ({capacity} participants)")]
    CapacityExceeded {
        event_id: i32,
        title: String,
        capacity: u32,
    },
}
