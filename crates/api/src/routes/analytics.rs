//! Route definitions for the `/analytics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`.
///
/// ```text
/// GET /overview   -> overview (manager/admin)
/// GET /offices    -> offices (manager/admin)
/// GET /me         -> me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(analytics::overview))
        .route("/offices", get(analytics::offices))
        .route("/me", get(analytics::me))
}
