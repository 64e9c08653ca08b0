//! Handlers for the `/alerts` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use officehub_core::types::DbId;
use officehub_db::models::alert::{Alert, AlertFilter};
use officehub_db::repositories::AlertRepo;
use officehub_events::{event_types, OfficeEvent};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireElevated;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    pub resolved: Option<bool>,
    /// Managers and admins may narrow to one user; ignored for employees.
    pub user_id: Option<DbId>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// GET /api/v1/alerts
///
/// Employees see their own alerts; managers and admins see everyone's.
pub async fn list_alerts(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AlertQuery>,
) -> Json<DataResponse<Vec<Alert>>> {
    let user_id = if auth.is_elevated() {
        params.user_id
    } else {
        Some(auth.user_id)
    };
    let filter = AlertFilter {
        user_id,
        resolved: params.resolved,
    };
    let alerts = AlertRepo::list(
        &state.pool,
        filter,
        officehub_core::notification::clamp_limit(params.limit),
        params.offset.unwrap_or(0),
    )
    .await;
    Json(DataResponse { data: alerts })
}

/// POST /api/v1/alerts/{id}/resolve
pub async fn resolve_alert(
    RequireElevated(user): RequireElevated,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Alert>>> {
    let alert = AlertRepo::resolve(&state.pool, id, user.user_id, Utc::now()).await?;

    tracing::info!(alert_id = alert.id, resolved_by = user.user_id, "Alert resolved");
    state.event_bus.publish(
        OfficeEvent::new(event_types::ALERT_RESOLVED)
            .with_source("alert", alert.id)
            .with_actor(user.user_id),
    );

    Ok(Json(DataResponse { data: alert }))
}
