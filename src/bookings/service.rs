use crate::bookings::{BookingConfirmation, BookingError};
use crate::catalog::CatalogStore;

/// Service for event bookings
///
/// Bookings are not idempotent: every call that finds a free seat takes it.
#[derive(Debug, Default)]
pub struct BookingService {
    log: Vec<BookingConfirmation>,
}

impl BookingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confirmed bookings in the order they were made
    pub fn bookings(&self) -> &[BookingConfirmation] {
        &self.log
    }

    /// Book one seat at an event
    ///
    /// # Returns
    /// The confirmation, or why the seat could not be booked. Failures leave
    /// the event and the booking log unchanged.
    pub fn book_event(
        &mut self,
        catalog: &mut CatalogStore,
        event_id: i32,
    ) -> Result<BookingConfirmation, BookingError> {
        let event = catalog
            .event_mut(event_id)
            .ok_or(BookingError::EventNotFound(event_id))?;

        if event.is_full() {
            tracing::warn!(
                "Booking refused: event {} is full ({}/{})",
                event.id,
                event.current_participants,
                event.max_participants
            );
            return Err(BookingError::CapacityExceeded {
                event_id: event.id,
                title: event.title.clone(),
                capacity: event.max_participants,
            });
        }

        event.current_participants += 1;
        let confirmation = BookingConfirmation::for_event(event);

        tracing::info!(
            "Booked event {} ({}), {}/{} participants",
            event.id,
            event.title,
            event.current_participants,
            event.max_participants
        );

        self.log.push(confirmation.clone());
        Ok(confirmation)
    }
}
