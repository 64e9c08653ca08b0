//! Booking interval rules and the confirmed → cancelled lifecycle.
//!
//! Intervals are half-open: `[start, end)`. Two intervals overlap iff
//! `a.start < b.end && b.start < a.end`, so back-to-back bookings that share
//! a boundary instant do not conflict, while an interval that strictly
//! contains another one does.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::is_elevated;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest reservation a single booking may span.
pub const MAX_BOOKING_DAYS: i64 = 7;

/// Maximum length of a meeting title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What kind of resource a booking reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Desk,
    Meeting,
}

impl BookingType {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingType::Desk => "desk",
            BookingType::Meeting => "meeting",
        }
    }

    /// Entity name used in `NotFound` errors for the reserved resource.
    pub fn resource_entity(self) -> &'static str {
        match self {
            BookingType::Desk => "Desk",
            BookingType::Meeting => "Room",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Time ranges
// ---------------------------------------------------------------------------

/// A validated half-open interval `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeRange {
    /// Build a range, rejecting empty or inverted intervals.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::Validation(
                "start_date must be before end_date".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `instant` falls inside the range (start inclusive, end exclusive).
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

// ---------------------------------------------------------------------------
// Reservation seam
// ---------------------------------------------------------------------------

/// Read access to a stored booking, independent of how it is stored.
pub trait Reservation {
    fn booking_id(&self) -> DbId;
    fn booking_type(&self) -> BookingType;
    fn resource_id(&self) -> DbId;
    fn owner_id(&self) -> DbId;
    fn status(&self) -> BookingStatus;
    fn range(&self) -> TimeRange;

    fn is_confirmed(&self) -> bool {
        self.status() == BookingStatus::Confirmed
    }
}

/// Find the first confirmed booking of the same type on the same resource
/// whose interval overlaps `candidate`.
pub fn find_conflict<'a, R, I>(
    existing: I,
    booking_type: BookingType,
    resource_id: DbId,
    candidate: &TimeRange,
) -> Option<&'a R>
where
    R: Reservation + 'a,
    I: IntoIterator<Item = &'a R>,
{
    existing.into_iter().find(|b| {
        b.is_confirmed()
            && b.booking_type() == booking_type
            && b.resource_id() == resource_id
            && b.range().overlaps(candidate)
    })
}

/// Find a confirmed booking on the resource that covers `instant`.
pub fn find_covering<'a, R, I>(
    existing: I,
    booking_type: BookingType,
    resource_id: DbId,
    instant: Timestamp,
) -> Option<&'a R>
where
    R: Reservation + 'a,
    I: IntoIterator<Item = &'a R>,
{
    existing.into_iter().find(|b| {
        b.is_confirmed()
            && b.booking_type() == booking_type
            && b.resource_id() == resource_id
            && b.range().contains(instant)
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a requested window against the current time and length limit.
pub fn validate_booking_window(range: &TimeRange, now: Timestamp) -> Result<(), CoreError> {
    if range.end <= now {
        return Err(CoreError::Validation(
            "Booking must end in the future".into(),
        ));
    }
    if range.duration() > Duration::days(MAX_BOOKING_DAYS) {
        return Err(CoreError::Validation(format!(
            "Booking cannot span more than {MAX_BOOKING_DAYS} days"
        )));
    }
    Ok(())
}

/// Validate the meeting-specific fields of a room booking.
pub fn validate_room_request(
    title: &str,
    attendee_count: usize,
    capacity: u32,
) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Meeting title cannot be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Meeting title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    if attendee_count > capacity as usize {
        return Err(CoreError::Validation(format!(
            "{attendee_count} attendees exceed room capacity of {capacity}"
        )));
    }
    Ok(())
}

/// Check that `requester` may cancel `booking` and that it is still confirmed.
///
/// Ownership is checked before state so that a stranger cannot probe
/// whether someone else's booking was already cancelled.
pub fn validate_cancellation<R: Reservation>(
    booking: &R,
    requester_id: DbId,
    requester_role: &str,
) -> Result<(), CoreError> {
    if booking.owner_id() != requester_id && !is_elevated(requester_role) {
        return Err(CoreError::Forbidden(
            "Only the booking owner or an admin can cancel this booking".into(),
        ));
    }
    if booking.status() != BookingStatus::Confirmed {
        return Err(CoreError::InvalidState(format!(
            "Booking {} is already {}",
            booking.booking_id(),
            booking.status().as_str()
        )));
    }
    Ok(())
}

/// Whether `requester` may read `booking`.
pub fn can_view<R: Reservation>(booking: &R, requester_id: DbId, requester_role: &str) -> bool {
    booking.owner_id() == requester_id || is_elevated(requester_role)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
