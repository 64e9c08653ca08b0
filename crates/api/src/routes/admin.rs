//! Route definitions for the `/admin` resource.
//!
//! Every handler enforces the `admin` role via [`RequireAdmin`].
//!
//! [`RequireAdmin`]: crate::middleware::rbac::RequireAdmin

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET /users                -> list_users
/// PUT /users/{id}/role      -> update_role
/// PUT /desks/{id}/status    -> set_desk_status
/// PUT /rooms/{id}/status    -> set_room_status
/// GET /events               -> list_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/role", put(admin::update_role))
        .route("/desks/{id}/status", put(admin::set_desk_status))
        .route("/rooms/{id}/status", put(admin::set_room_status))
        .route("/events", get(admin::list_events))
}
