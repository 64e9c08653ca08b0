//! Offices, floors, desks and meeting rooms.

use officehub_core::catalog::{DeskStatus, RoomStatus};
use officehub_core::types::DbId;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Office {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub floor_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Floor {
    pub id: DbId,
    pub office_id: DbId,
    pub level: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Desk {
    pub id: DbId,
    pub floor_id: DbId,
    pub office_id: DbId,
    pub label: String,
    pub status: DeskStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: DbId,
    pub floor_id: DbId,
    pub office_id: DbId,
    pub name: String,
    pub capacity: u32,
    pub status: RoomStatus,
}

/// Number of rows created by a catalog seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub offices: usize,
    pub floors: usize,
    pub desks: usize,
    pub rooms: usize,
}
