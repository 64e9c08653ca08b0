//! Desk and meeting-room bookings.

use officehub_core::booking::{BookingStatus, BookingType, Reservation, TimeRange};
use officehub_core::types::{DbId, Timestamp};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub booking_type: BookingType,
    pub resource_id: DbId,
    pub user_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: BookingStatus,
    pub title: Option<String>,
    pub attendees: Vec<String>,
    pub created_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,
    pub cancelled_by: Option<DbId>,
}

impl Reservation for Booking {
    fn booking_id(&self) -> DbId {
        self.id
    }

    fn booking_type(&self) -> BookingType {
        self.booking_type
    }

    fn resource_id(&self) -> DbId {
        self.resource_id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }

    fn status(&self) -> BookingStatus {
        self.status
    }

    fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// DTO for creating a booking. The range is validated before it gets here.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub booking_type: BookingType,
    pub resource_id: DbId,
    pub user_id: DbId,
    pub range: TimeRange,
    pub title: Option<String>,
    pub attendees: Vec<String>,
}

/// Filters for listing a user's bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub booking_type: Option<BookingType>,
    /// When set, only bookings ending after this instant.
    pub ending_after: Option<Timestamp>,
}
