//! Resource catalog: desk/room status values and the deterministic office
//! layout generated at process start.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status values
// ---------------------------------------------------------------------------

/// Desk status. A desk is `Occupied` exactly while an active presence
/// record references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeskStatus {
    Available,
    Occupied,
    Maintenance,
}

/// Meeting rooms are never occupied through attendance, only taken out of
/// service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Maintenance,
}

/// Validate an administrative desk status change.
///
/// Only `available` and `maintenance` may be set by hand; `occupied` is owned
/// by the attendance flow, and an occupied desk must be checked out first.
pub fn validate_desk_status_change(
    current: DeskStatus,
    target: DeskStatus,
) -> Result<(), CoreError> {
    if target == DeskStatus::Occupied {
        return Err(CoreError::Validation(
            "Desk status 'occupied' is set by check-in only".into(),
        ));
    }
    if current == DeskStatus::Occupied {
        return Err(CoreError::Conflict(
            "Desk is occupied; it must be checked out first".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Layout generation
// ---------------------------------------------------------------------------

/// Room capacities assigned round-robin on each floor.
pub const ROOM_CAPACITIES: &[u32] = &[4, 6, 8, 12];

/// Shape of the generated catalog.
#[derive(Debug, Clone)]
pub struct CatalogSpec {
    /// `(name, city)` per office.
    pub offices: Vec<(String, String)>,
    pub floors_per_office: u32,
    pub desks_per_floor: u32,
    pub rooms_per_floor: u32,
}

impl Default for CatalogSpec {
    fn default() -> Self {
        Self {
            offices: vec![
                ("Headquarters".into(), "London".into()),
                ("Innovation Hub".into(), "Berlin".into()),
                ("Harbour Office".into(), "Lisbon".into()),
            ],
            floors_per_office: 3,
            desks_per_floor: 20,
            rooms_per_floor: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeSeed {
    pub name: String,
    pub city: String,
    pub floors: Vec<FloorSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorSeed {
    pub level: u32,
    pub name: String,
    pub desk_labels: Vec<String>,
    pub rooms: Vec<RoomSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSeed {
    pub name: String,
    pub capacity: u32,
}

/// Expand a [`CatalogSpec`] into concrete offices, floors, desks and rooms.
///
/// The output depends only on `spec`, so ids assigned in insertion
/// order are stable across restarts.
pub fn generate_layout(spec: &CatalogSpec) -> Vec<OfficeSeed> {
    spec.offices
        .iter()
        .map(|(name, city)| OfficeSeed {
            name: name.clone(),
            city: city.clone(),
            floors: (1..=spec.floors_per_office)
                .map(|level| FloorSeed {
                    level,
                    name: format!("Floor {level}"),
                    desk_labels: (1..=spec.desks_per_floor)
                        .map(|n| format!("F{level}-D{n:02}"))
                        .collect(),
                    rooms: (1..=spec.rooms_per_floor)
                        .map(|n| RoomSeed {
                            name: format!("Room {level}.{n}"),
                            capacity: ROOM_CAPACITIES
                                [(n as usize - 1) % ROOM_CAPACITIES.len()],
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
