//! Read-only handlers for offices, floors, desks and rooms.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use officehub_core::booking::BookingType;
use officehub_core::catalog::{DeskStatus, RoomStatus};
use officehub_core::error::CoreError;
use officehub_core::types::DbId;
use officehub_db::models::booking::Booking;
use officehub_db::models::catalog::{Desk, Floor, Office, Room};
use officehub_db::repositories::{BookingRepo, CatalogRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::WindowParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeskQuery {
    pub status: Option<DeskStatus>,
}

#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    pub status: Option<RoomStatus>,
    pub min_capacity: Option<u32>,
}

/// GET /api/v1/offices
pub async fn list_offices(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<Office>>> {
    Json(DataResponse {
        data: CatalogRepo::list_offices(&state.pool).await,
    })
}

/// GET /api/v1/offices/{id}
pub async fn get_office(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Office>>> {
    let office = CatalogRepo::find_office(&state.pool, id)
        .await
        .ok_or(CoreError::NotFound {
            entity: "Office",
            id,
        })?;
    Ok(Json(DataResponse { data: office }))
}

/// GET /api/v1/offices/{id}/floors
pub async fn list_floors(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(office_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Floor>>>> {
    if CatalogRepo::find_office(&state.pool, office_id).await.is_none() {
        return Err(CoreError::NotFound {
            entity: "Office",
            id: office_id,
        }
        .into());
    }
    Ok(Json(DataResponse {
        data: CatalogRepo::list_floors(&state.pool, office_id).await,
    }))
}

/// GET /api/v1/floors/{id}/desks?status=
pub async fn list_desks(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(floor_id): Path<DbId>,
    Query(params): Query<DeskQuery>,
) -> AppResult<Json<DataResponse<Vec<Desk>>>> {
    ensure_floor(&state, floor_id).await?;
    Ok(Json(DataResponse {
        data: CatalogRepo::list_desks(&state.pool, floor_id, params.status).await,
    }))
}

/// GET /api/v1/floors/{id}/rooms?status=&min_capacity=
pub async fn list_rooms(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(floor_id): Path<DbId>,
    Query(params): Query<RoomQuery>,
) -> AppResult<Json<DataResponse<Vec<Room>>>> {
    ensure_floor(&state, floor_id).await?;
    Ok(Json(DataResponse {
        data: CatalogRepo::list_rooms(&state.pool, floor_id, params.status, params.min_capacity)
            .await,
    }))
}

/// GET /api/v1/desks/{id}
pub async fn get_desk(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Desk>>> {
    let desk = CatalogRepo::find_desk(&state.pool, id)
        .await
        .ok_or(CoreError::NotFound { entity: "Desk", id })?;
    Ok(Json(DataResponse { data: desk }))
}

/// GET /api/v1/rooms/{id}
pub async fn get_room(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Room>>> {
    let room = CatalogRepo::find_room(&state.pool, id)
        .await
        .ok_or(CoreError::NotFound { entity: "Room", id })?;
    Ok(Json(DataResponse { data: room }))
}

/// GET /api/v1/desks/{id}/bookings?from=&to=
///
/// Confirmed bookings of the desk overlapping the window.
pub async fn desk_bookings(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(window): Query<WindowParams>,
) -> AppResult<Json<DataResponse<Vec<Booking>>>> {
    if CatalogRepo::find_desk(&state.pool, id).await.is_none() {
        return Err(CoreError::NotFound { entity: "Desk", id }.into());
    }
    let window = window.resolve(Utc::now())?;
    Ok(Json(DataResponse {
        data: BookingRepo::list_for_resource(&state.pool, BookingType::Desk, id, &window).await,
    }))
}

/// GET /api/v1/rooms/{id}/bookings?from=&to=
pub async fn room_bookings(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(window): Query<WindowParams>,
) -> AppResult<Json<DataResponse<Vec<Booking>>>> {
    if CatalogRepo::find_room(&state.pool, id).await.is_none() {
        return Err(CoreError::NotFound { entity: "Room", id }.into());
    }
    let window = window.resolve(Utc::now())?;
    Ok(Json(DataResponse {
        data: BookingRepo::list_for_resource(&state.pool, BookingType::Meeting, id, &window)
            .await,
    }))
}

async fn ensure_floor(state: &AppState, floor_id: DbId) -> Result<(), CoreError> {
    match CatalogRepo::find_floor(&state.pool, floor_id).await {
        Some(_) => Ok(()),
        None => Err(CoreError::NotFound {
            entity: "Floor",
            id: floor_id,
        }),
    }
}
