//! Route definitions for offices, floors, desks and rooms.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/offices`.
///
/// ```text
/// GET /              -> list_offices
/// GET /{id}          -> get_office
/// GET /{id}/floors   -> list_floors
/// ```
pub fn offices_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_offices))
        .route("/{id}", get(catalog::get_office))
        .route("/{id}/floors", get(catalog::list_floors))
}

/// Routes mounted at `/floors`.
///
/// ```text
/// GET /{id}/desks    -> list_desks
/// GET /{id}/rooms    -> list_rooms (?status=&min_capacity=)
/// ```
pub fn floors_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/desks", get(catalog::list_desks))
        .route("/{id}/rooms", get(catalog::list_rooms))
}

/// Routes mounted at `/desks`.
pub fn desks_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(catalog::get_desk))
        .route("/{id}/bookings", get(catalog::desk_bookings))
}

/// Routes mounted at `/rooms`.
pub fn rooms_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(catalog::get_room))
        .route("/{id}/bookings", get(catalog::room_bookings))
}
