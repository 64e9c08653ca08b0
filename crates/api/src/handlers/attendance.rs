//! Handlers for the `/attendance` resource (desk check-in / check-out).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use officehub_core::compliance::resolve_compliance;
use officehub_core::types::DbId;
use officehub_db::models::alert::Alert;
use officehub_db::models::presence::{CheckIn, Presence};
use officehub_db::repositories::PresenceRepo;
use officehub_detection::detect_with_timeout;
use officehub_events::{event_types, OfficeEvent};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireElevated;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub desk_id: DbId,
    /// Webcam frame as a base64 data URL.
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub attendance: Presence,
    /// Present when the check-in raised a mask compliance alert.
    pub alert: Option<Alert>,
}

#[derive(Debug, Deserialize)]
pub struct ActiveQuery {
    pub office_id: Option<DbId>,
}

/// POST /api/v1/attendance/check-in
///
/// Validates the desk, asks the mask detector (outside the store lock),
/// then records the check-in as one unit of work.
pub async fn check_in(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CheckInRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CheckInResponse>>)> {
    PresenceRepo::precheck(&state.pool, input.desk_id, auth.user_id, Utc::now()).await?;

    let detection = &state.config.detection;
    let outcome = detect_with_timeout(
        state.detector.as_ref(),
        input.image.as_deref(),
        detection.timeout(),
    )
    .await;
    let compliance = resolve_compliance(&outcome, detection.failure_policy)?;

    let result = PresenceRepo::check_in(
        &state.pool,
        &CheckIn {
            desk_id: input.desk_id,
            user_id: auth.user_id,
            compliance,
        },
        Utc::now(),
    )
    .await?;

    let presence = &result.presence;
    tracing::info!(
        attendance_id = presence.id,
        desk_id = presence.desk_id,
        user_id = presence.user_id,
        compliance = ?presence.mask_compliance,
        "Checked in"
    );
    state.event_bus.publish(
        OfficeEvent::new(event_types::ATTENDANCE_CHECKED_IN)
            .with_source("attendance", presence.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "desk_id": presence.desk_id,
                "booking_id": presence.booking_id,
                "mask_compliance": presence.mask_compliance,
            })),
    );

    if let Some(alert) = &result.alert {
        tracing::warn!(
            alert_id = alert.id,
            desk_id = alert.desk_id,
            user_id = alert.user_id,
            severity = ?alert.severity,
            "Mask compliance alert raised"
        );
        state.event_bus.publish(
            OfficeEvent::new(event_types::ALERT_RAISED)
                .with_source("alert", alert.id)
                .with_actor(auth.user_id)
                .with_payload(serde_json::json!({
                    "alert_type": alert.alert_type,
                    "severity": alert.severity,
                    "attendance_id": alert.presence_id,
                })),
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CheckInResponse {
                attendance: result.presence,
                alert: result.alert,
            },
        }),
    ))
}

/// POST /api/v1/attendance/{id}/check-out
pub async fn check_out(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Presence>>> {
    let presence = PresenceRepo::check_out(&state.pool, id, auth.user_id, Utc::now()).await?;

    tracing::info!(
        attendance_id = presence.id,
        desk_id = presence.desk_id,
        duration_secs = presence.duration_secs,
        "Checked out"
    );
    state.event_bus.publish(
        OfficeEvent::new(event_types::ATTENDANCE_CHECKED_OUT)
            .with_source("attendance", presence.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "desk_id": presence.desk_id,
                "duration_secs": presence.duration_secs,
            })),
    );

    Ok(Json(DataResponse { data: presence }))
}

/// GET /api/v1/attendance
///
/// The caller's attendance history, newest first.
pub async fn list_attendance(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> Json<DataResponse<Vec<Presence>>> {
    Json(DataResponse {
        data: PresenceRepo::list_for_user(&state.pool, auth.user_id, page.limit(), page.offset())
            .await,
    })
}

/// GET /api/v1/attendance/current
///
/// The caller's active record, or `null` when not checked in.
pub async fn current(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Json<DataResponse<Option<Presence>>> {
    Json(DataResponse {
        data: PresenceRepo::find_active_for_user(&state.pool, auth.user_id).await,
    })
}

/// GET /api/v1/attendance/active?office_id=
///
/// Everyone currently checked in (manager/admin).
pub async fn list_active(
    RequireElevated(_user): RequireElevated,
    State(state): State<AppState>,
    Query(params): Query<ActiveQuery>,
) -> Json<DataResponse<Vec<Presence>>> {
    Json(DataResponse {
        data: PresenceRepo::list_active(&state.pool, params.office_id).await,
    })
}
