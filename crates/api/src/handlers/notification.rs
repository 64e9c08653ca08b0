//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication and only ever touch the caller's
//! own notifications.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use officehub_core::error::CoreError;
use officehub_core::notification::clamp_limit;
use officehub_core::types::DbId;
use officehub_db::models::notification::Notification;
use officehub_db::repositories::NotificationRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// Only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    /// Defaults to 50, capped at 100.
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub updated: usize,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> Json<DataResponse<Vec<Notification>>> {
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only.unwrap_or(false),
        clamp_limit(params.limit),
        params.offset.unwrap_or(0),
    )
    .await;
    Json(DataResponse {
        data: notifications,
    })
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Json<DataResponse<UnreadCount>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await;
    Json(DataResponse {
        data: UnreadCount { count },
    })
}

/// POST /api/v1/notifications/{id}/read
///
/// Returns 204 No Content, also when the notification was already read.
/// 404 if the notification does not belong to the caller.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found =
        NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id, Utc::now()).await;
    if !found {
        return Err(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Json<DataResponse<MarkedRead>> {
    let updated = NotificationRepo::mark_all_read(&state.pool, auth.user_id, Utc::now()).await;
    Json(DataResponse {
        data: MarkedRead { updated },
    })
}
