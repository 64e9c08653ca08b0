//! Route definitions for the `/attendance` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// GET  /                  -> list_attendance
/// POST /check-in          -> check_in
/// GET  /current           -> current
/// GET  /active            -> list_active (manager/admin)
/// POST /{id}/check-out    -> check_out
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::list_attendance))
        .route("/check-in", post(attendance::check_in))
        .route("/current", get(attendance::current))
        .route("/active", get(attendance::list_active))
        .route("/{id}/check-out", post(attendance::check_out))
}
