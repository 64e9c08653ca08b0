//! Handlers for the `/bookings` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use officehub_core::booking::{
    can_view, validate_booking_window, BookingStatus, BookingType, TimeRange,
};
use officehub_core::error::CoreError;
use officehub_core::types::{DbId, Timestamp};
use officehub_db::models::booking::{Booking, BookingFilter, CreateBooking};
use officehub_db::repositories::BookingRepo;
use officehub_events::{event_types, OfficeEvent};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateDeskBookingRequest {
    pub desk_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomBookingRequest {
    pub room_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub title: String,
    #[serde(default)]
    pub attendees: Vec<String>,
}

/// Query parameters for `GET /bookings`.
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    #[serde(rename = "type")]
    pub booking_type: Option<BookingType>,
    /// Only bookings that have not ended yet.
    #[serde(default)]
    pub upcoming_only: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings/desk
pub async fn create_desk_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateDeskBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    let request = CreateBooking {
        booking_type: BookingType::Desk,
        resource_id: input.desk_id,
        user_id: auth.user_id,
        range: TimeRange::new(input.start_date, input.end_date)?,
        title: None,
        attendees: Vec::new(),
    };
    let booking = create(&state, &request).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// POST /api/v1/bookings/room
pub async fn create_room_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRoomBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    let request = CreateBooking {
        booking_type: BookingType::Meeting,
        resource_id: input.room_id,
        user_id: auth.user_id,
        range: TimeRange::new(input.start_date, input.end_date)?,
        title: Some(input.title),
        attendees: input.attendees,
    };
    let booking = create(&state, &request).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /api/v1/bookings
///
/// The caller's bookings ordered by start date.
pub async fn list_bookings(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<BookingListQuery>,
) -> Json<DataResponse<Vec<Booking>>> {
    let filter = BookingFilter {
        status: params.status,
        booking_type: params.booking_type,
        ending_after: params.upcoming_only.then(Utc::now),
    };
    Json(DataResponse {
        data: BookingRepo::list_for_user(&state.pool, auth.user_id, &filter).await,
    })
}

/// GET /api/v1/bookings/{id}
///
/// Visible to the owner and to managers/admins.
pub async fn get_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await
        .ok_or(CoreError::NotFound {
            entity: "Booking",
            id,
        })?;
    if !can_view(&booking, auth.user_id, &auth.role) {
        return Err(CoreError::Forbidden("You cannot view this booking".into()).into());
    }
    Ok(Json(DataResponse { data: booking }))
}

/// POST /api/v1/bookings/{id}/cancel
pub async fn cancel_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = BookingRepo::cancel(&state.pool, id, auth.user_id, &auth.role, Utc::now()).await?;

    tracing::info!(
        booking_id = booking.id,
        owner_id = booking.user_id,
        cancelled_by = auth.user_id,
        "Booking cancelled"
    );
    state.event_bus.publish(
        OfficeEvent::new(event_types::BOOKING_CANCELLED)
            .with_source("booking", booking.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "booking_type": booking.booking_type,
                "resource_id": booking.resource_id,
                "owner_id": booking.user_id,
            })),
    );

    Ok(Json(DataResponse { data: booking }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create(state: &AppState, request: &CreateBooking) -> Result<Booking, CoreError> {
    let now = Utc::now();
    validate_booking_window(&request.range, now)?;

    let (booking, _) = BookingRepo::create(&state.pool, request, now)
        .await
        .inspect_err(|e| {
            tracing::info!(
                booking_type = request.booking_type.as_str(),
                resource_id = request.resource_id,
                user_id = request.user_id,
                error = %e,
                "Booking rejected"
            );
        })?;

    tracing::info!(
        booking_id = booking.id,
        booking_type = booking.booking_type.as_str(),
        resource_id = booking.resource_id,
        user_id = booking.user_id,
        "Booking confirmed"
    );
    state.event_bus.publish(
        OfficeEvent::new(event_types::BOOKING_CREATED)
            .with_source("booking", booking.id)
            .with_actor(booking.user_id)
            .with_payload(serde_json::json!({
                "booking_type": booking.booking_type,
                "resource_id": booking.resource_id,
                "start_date": booking.start_date,
                "end_date": booking.end_date,
            })),
    );

    Ok(booking)
}
