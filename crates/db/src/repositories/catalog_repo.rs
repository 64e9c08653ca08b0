//! Repository for offices, floors, desks and rooms.

use officehub_core::catalog::{validate_desk_status_change, DeskStatus, OfficeSeed, RoomStatus};
use officehub_core::error::CoreError;
use officehub_core::types::DbId;

use crate::models::catalog::{CatalogCounts, Desk, Floor, Office, Room};
use crate::Database;

/// Provides catalog seeding, lookups and administrative status changes.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Insert a generated layout. Intended to run once at startup.
    pub async fn seed(db: &Database, layout: &[OfficeSeed]) -> CatalogCounts {
        let mut tables = db.write().await;
        let mut counts = CatalogCounts::default();

        for office_seed in layout {
            let office_id = tables
                .offices
                .insert_with(|id| Office {
                    id,
                    name: office_seed.name.clone(),
                    city: office_seed.city.clone(),
                    floor_count: office_seed.floors.len() as u32,
                })
                .id;
            counts.offices += 1;

            for floor_seed in &office_seed.floors {
                let floor_id = tables
                    .floors
                    .insert_with(|id| Floor {
                        id,
                        office_id,
                        level: floor_seed.level,
                        name: floor_seed.name.clone(),
                    })
                    .id;
                counts.floors += 1;

                for label in &floor_seed.desk_labels {
                    tables.desks.insert_with(|id| Desk {
                        id,
                        floor_id,
                        office_id,
                        label: label.clone(),
                        status: DeskStatus::Available,
                    });
                    counts.desks += 1;
                }

                for room_seed in &floor_seed.rooms {
                    tables.rooms.insert_with(|id| Room {
                        id,
                        floor_id,
                        office_id,
                        name: room_seed.name.clone(),
                        capacity: room_seed.capacity,
                        status: RoomStatus::Available,
                    });
                    counts.rooms += 1;
                }
            }
        }

        tracing::info!(
            offices = counts.offices,
            floors = counts.floors,
            desks = counts.desks,
            rooms = counts.rooms,
            "Resource catalog seeded"
        );
        counts
    }

    pub async fn list_offices(db: &Database) -> Vec<Office> {
        db.read().await.offices.iter().cloned().collect()
    }

    pub async fn find_office(db: &Database, id: DbId) -> Option<Office> {
        db.read().await.offices.get(id).cloned()
    }

    /// Floors of an office ordered by level.
    pub async fn list_floors(db: &Database, office_id: DbId) -> Vec<Floor> {
        let tables = db.read().await;
        let mut floors: Vec<Floor> = tables
            .floors
            .iter()
            .filter(|f| f.office_id == office_id)
            .cloned()
            .collect();
        floors.sort_by_key(|f| f.level);
        floors
    }

    pub async fn find_floor(db: &Database, id: DbId) -> Option<Floor> {
        db.read().await.floors.get(id).cloned()
    }

    /// Desks on a floor, optionally filtered by status.
    pub async fn list_desks(
        db: &Database,
        floor_id: DbId,
        status: Option<DeskStatus>,
    ) -> Vec<Desk> {
        let tables = db.read().await;
        tables
            .desks
            .iter()
            .filter(|d| d.floor_id == floor_id && status.map_or(true, |s| d.status == s))
            .cloned()
            .collect()
    }

    pub async fn find_desk(db: &Database, id: DbId) -> Option<Desk> {
        db.read().await.desks.get(id).cloned()
    }

    /// Rooms on a floor, optionally filtered by status and minimum capacity.
    pub async fn list_rooms(
        db: &Database,
        floor_id: DbId,
        status: Option<RoomStatus>,
        min_capacity: Option<u32>,
    ) -> Vec<Room> {
        let tables = db.read().await;
        tables
            .rooms
            .iter()
            .filter(|r| {
                r.floor_id == floor_id
                    && status.map_or(true, |s| r.status == s)
                    && r.capacity >= min_capacity.unwrap_or(0)
            })
            .cloned()
            .collect()
    }

    pub async fn find_room(db: &Database, id: DbId) -> Option<Room> {
        db.read().await.rooms.get(id).cloned()
    }

    /// Administrative desk status change (`available` / `maintenance`).
    pub async fn set_desk_status(
        db: &Database,
        desk_id: DbId,
        status: DeskStatus,
    ) -> Result<Desk, CoreError> {
        let mut tables = db.write().await;
        let desk = tables.desks.get_mut(desk_id).ok_or(CoreError::NotFound {
            entity: "Desk",
            id: desk_id,
        })?;
        validate_desk_status_change(desk.status, status)?;
        desk.status = status;
        Ok(desk.clone())
    }

    pub async fn set_room_status(
        db: &Database,
        room_id: DbId,
        status: RoomStatus,
    ) -> Result<Room, CoreError> {
        let mut tables = db.write().await;
        let room = tables.rooms.get_mut(room_id).ok_or(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        })?;
        room.status = status;
        Ok(room.clone())
    }
}
