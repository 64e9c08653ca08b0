//! Dashboard handlers.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use officehub_core::analytics::UserStats;
use officehub_db::repositories::analytics_repo::{OfficeOccupancy, Overview};
use officehub_db::repositories::AnalyticsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireElevated;
use crate::query::WindowParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/analytics/overview?from=&to=
///
/// Organisation-wide figures (manager/admin). Booking and compliance
/// figures cover the window; desk and alert figures are current.
pub async fn overview(
    RequireElevated(_user): RequireElevated,
    State(state): State<AppState>,
    Query(window): Query<WindowParams>,
) -> AppResult<Json<DataResponse<Overview>>> {
    let window = window.resolve(Utc::now())?;
    Ok(Json(DataResponse {
        data: AnalyticsRepo::overview(&state.pool, &window).await,
    }))
}

/// GET /api/v1/analytics/offices
pub async fn offices(
    RequireElevated(_user): RequireElevated,
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<OfficeOccupancy>>> {
    Json(DataResponse {
        data: AnalyticsRepo::office_breakdown(&state.pool).await,
    })
}

/// GET /api/v1/analytics/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> Json<DataResponse<UserStats>> {
    Json(DataResponse {
        data: AnalyticsRepo::user_stats(&state.pool, auth.user_id, Utc::now()).await,
    })
}
