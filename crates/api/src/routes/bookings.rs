//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET  /              -> list_bookings
/// POST /desk          -> create_desk_booking
/// POST /room          -> create_room_booking
/// GET  /{id}          -> get_booking
/// POST /{id}/cancel   -> cancel_booking
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::list_bookings))
        .route("/desk", post(booking::create_desk_booking))
        .route("/room", post(booking::create_room_booking))
        .route("/{id}", get(booking::get_booking))
        .route("/{id}/cancel", post(booking::cancel_booking))
}
