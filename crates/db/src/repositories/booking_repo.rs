//! Repository for the `bookings` table.
//!
//! `create` and `cancel` are units of work: the conflict check, the insert
//! or status change, and the owner's notification happen under one write
//! lock, so two overlapping requests can never both be confirmed.

use officehub_core::booking::{
    find_conflict, validate_cancellation, validate_room_request, BookingStatus, BookingType,
    Reservation, TimeRange,
};
use officehub_core::catalog::{DeskStatus, RoomStatus};
use officehub_core::error::CoreError;
use officehub_core::notification;
use officehub_core::types::{DbId, Timestamp};

use super::notification_repo::NotificationRepo;
use crate::models::booking::{Booking, BookingFilter, CreateBooking};
use crate::models::notification::Notification;
use crate::{Database, Tables};

/// Provides the booking lifecycle operations.
pub struct BookingRepo;

impl BookingRepo {
    /// Confirm a new booking if the resource is free for the whole range.
    ///
    /// Fails with `NotFound` for an unknown resource, `Validation` for a
    /// meeting that does not fit the room, and `Conflict` when the resource
    /// is out of service or an overlapping confirmed booking exists. Nothing
    /// is written on failure.
    pub async fn create(
        db: &Database,
        input: &CreateBooking,
        now: Timestamp,
    ) -> Result<(Booking, Notification), CoreError> {
        let mut tables = db.write().await;

        let label = Self::resolve_resource(&tables, input)?;

        if let Some(existing) = find_conflict(
            &tables.bookings,
            input.booking_type,
            input.resource_id,
            &input.range,
        ) {
            return Err(CoreError::Conflict(format!(
                "{} {} is already booked from {} to {} (booking {})",
                input.booking_type.resource_entity(),
                input.resource_id,
                existing.start_date.to_rfc3339(),
                existing.end_date.to_rfc3339(),
                existing.id
            )));
        }

        let booking = tables
            .bookings
            .insert_with(|id| Booking {
                id,
                booking_type: input.booking_type,
                resource_id: input.resource_id,
                user_id: input.user_id,
                start_date: input.range.start,
                end_date: input.range.end,
                status: BookingStatus::Confirmed,
                title: input.title.as_ref().map(|t| t.trim().to_string()),
                attendees: input.attendees.clone(),
                created_at: now,
                cancelled_at: None,
                cancelled_by: None,
            })
            .clone();

        let note = NotificationRepo::push(
            &mut tables,
            booking.user_id,
            notification::booking_confirmed(booking.booking_type, &label, &input.range),
            now,
        );

        Ok((booking, note))
    }

    /// Cancel a confirmed booking on behalf of its owner or an elevated user.
    pub async fn cancel(
        db: &Database,
        booking_id: DbId,
        requester_id: DbId,
        requester_role: &str,
        now: Timestamp,
    ) -> Result<Booking, CoreError> {
        let mut tables = db.write().await;

        let booking = tables.bookings.get_mut(booking_id).ok_or(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        })?;
        validate_cancellation(&*booking, requester_id, requester_role)?;

        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(now);
        booking.cancelled_by = Some(requester_id);
        let booking = booking.clone();

        let label = Self::resource_label(&tables, booking.booking_type, booking.resource_id);
        NotificationRepo::push(
            &mut tables,
            booking.user_id,
            notification::booking_cancelled(
                booking.booking_type,
                &label,
                &booking.range(),
                booking.user_id == requester_id,
            ),
            now,
        );

        Ok(booking)
    }

    pub async fn find_by_id(db: &Database, id: DbId) -> Option<Booking> {
        db.read().await.bookings.get(id).cloned()
    }

    /// List a user's bookings ordered by start date.
    pub async fn list_for_user(
        db: &Database,
        user_id: DbId,
        filter: &BookingFilter,
    ) -> Vec<Booking> {
        let tables = db.read().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter(|b| filter.status.map_or(true, |s| b.status == s))
            .filter(|b| filter.booking_type.map_or(true, |t| b.booking_type == t))
            .filter(|b| filter.ending_after.map_or(true, |t| b.end_date > t))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.start_date, b.id));
        bookings
    }

    /// Confirmed bookings of a resource overlapping `window`, by start date.
    pub async fn list_for_resource(
        db: &Database,
        booking_type: BookingType,
        resource_id: DbId,
        window: &TimeRange,
    ) -> Vec<Booking> {
        let tables = db.read().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|b| {
                b.is_confirmed()
                    && b.booking_type == booking_type
                    && b.resource_id == resource_id
                    && b.range().overlaps(window)
            })
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start_date);
        bookings
    }

    // ---- private helpers ----

    /// Check the resource exists, is in service and fits the request.
    /// Returns its display label.
    fn resolve_resource(tables: &Tables, input: &CreateBooking) -> Result<String, CoreError> {
        let not_found = CoreError::NotFound {
            entity: input.booking_type.resource_entity(),
            id: input.resource_id,
        };
        match input.booking_type {
            BookingType::Desk => {
                let desk = tables.desks.get(input.resource_id).ok_or(not_found)?;
                if desk.status == DeskStatus::Maintenance {
                    return Err(CoreError::Conflict(format!(
                        "Desk {} is under maintenance",
                        desk.label
                    )));
                }
                Ok(desk.label.clone())
            }
            BookingType::Meeting => {
                let room = tables.rooms.get(input.resource_id).ok_or(not_found)?;
                if room.status == RoomStatus::Maintenance {
                    return Err(CoreError::Conflict(format!(
                        "{} is under maintenance",
                        room.name
                    )));
                }
                validate_room_request(
                    input.title.as_deref().unwrap_or_default(),
                    input.attendees.len(),
                    room.capacity,
                )?;
                Ok(room.name.clone())
            }
        }
    }

    fn resource_label(tables: &Tables, booking_type: BookingType, resource_id: DbId) -> String {
        let label = match booking_type {
            BookingType::Desk => tables.desks.get(resource_id).map(|d| d.label.clone()),
            BookingType::Meeting => tables.rooms.get(resource_id).map(|r| r.name.clone()),
        };
        label.unwrap_or_else(|| resource_id.to_string())
    }
}
