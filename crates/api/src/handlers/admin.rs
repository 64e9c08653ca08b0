//! Administration handlers. Every endpoint requires the `admin` role.

use axum::extract::{Path, Query, State};
use axum::Json;
use officehub_core::catalog::{DeskStatus, RoomStatus};
use officehub_core::error::CoreError;
use officehub_core::roles::validate_role;
use officehub_core::types::DbId;
use officehub_db::models::activity::ActivityEvent;
use officehub_db::models::catalog::{Desk, Room};
use officehub_db::models::user::User;
use officehub_db::repositories::{ActivityRepo, CatalogRepo, UserRepo};
use officehub_events::{event_types, OfficeEvent};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct DeskStatusRequest {
    pub status: DeskStatus,
}

#[derive(Debug, Deserialize)]
pub struct RoomStatusRequest {
    pub status: RoomStatus,
}

#[derive(Debug, Deserialize)]
pub struct EventQuery {
    pub event_type: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<User>>> {
    Json(DataResponse {
        data: UserRepo::list(&state.pool).await,
    })
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Takes effect for the user's next login or token refresh.
pub async fn update_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    validate_role(&input.role).map_err(CoreError::Validation)?;
    if id == admin.user_id && input.role != admin.role {
        return Err(CoreError::Conflict("Administrators cannot change their own role".into()).into());
    }

    let user = UserRepo::update_role(&state.pool, id, &input.role).await?;

    tracing::info!(user_id = user.id, role = %user.role, changed_by = admin.user_id, "User role changed");
    state.event_bus.publish(
        OfficeEvent::new(event_types::USER_ROLE_CHANGED)
            .with_source("user", user.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "role": user.role })),
    );

    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/admin/desks/{id}/status
pub async fn set_desk_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<DeskStatusRequest>,
) -> AppResult<Json<DataResponse<Desk>>> {
    let desk = CatalogRepo::set_desk_status(&state.pool, id, input.status).await?;

    tracing::info!(desk_id = desk.id, status = ?desk.status, "Desk status changed");
    state.event_bus.publish(
        OfficeEvent::new(event_types::DESK_STATUS_CHANGED)
            .with_source("desk", desk.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "status": desk.status })),
    );

    Ok(Json(DataResponse { data: desk }))
}

/// PUT /api/v1/admin/rooms/{id}/status
pub async fn set_room_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<RoomStatusRequest>,
) -> AppResult<Json<DataResponse<Room>>> {
    let room = CatalogRepo::set_room_status(&state.pool, id, input.status).await?;

    tracing::info!(room_id = room.id, status = ?room.status, "Room status changed");
    state.event_bus.publish(
        OfficeEvent::new(event_types::ROOM_STATUS_CHANGED)
            .with_source("room", room.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "status": room.status })),
    );

    Ok(Json(DataResponse { data: room }))
}

/// GET /api/v1/admin/events?event_type=&limit=
///
/// Recent entries of the persisted activity log, newest first.
pub async fn list_events(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<EventQuery>,
) -> Json<DataResponse<Vec<ActivityEvent>>> {
    let limit = officehub_core::notification::clamp_limit(params.limit);
    Json(DataResponse {
        data: ActivityRepo::list_recent(&state.pool, params.event_type.as_deref(), limit).await,
    })
}
