#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use officehub_core::booking::{BookingType, TimeRange};
use officehub_core::catalog::{generate_layout, CatalogSpec};
use officehub_core::types::{DbId, Timestamp};
use officehub_db::models::booking::CreateBooking;
use officehub_db::repositories::CatalogRepo;
use officehub_db::{create_pool, DbPool};

/// A store seeded with one office, one floor, four desks and two rooms
/// (capacities 4 and 6).
pub async fn seeded_pool() -> DbPool {
    let pool = create_pool();
    let spec = CatalogSpec {
        offices: vec![("Test Office".into(), "Testville".into())],
        floors_per_office: 1,
        desks_per_floor: 4,
        rooms_per_floor: 2,
    };
    CatalogRepo::seed(&pool, &generate_layout(&spec)).await;
    pool
}

/// 2030-03-04 at the given hour and minute, UTC.
pub fn at(hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2030, 3, 4, hour, minute, 0).unwrap()
}

/// A fixed "now" before every booking window used in tests.
pub fn now() -> Timestamp {
    at(8, 0)
}

pub fn desk_booking(desk_id: DbId, user_id: DbId, start: Timestamp, end: Timestamp) -> CreateBooking {
    CreateBooking {
        booking_type: BookingType::Desk,
        resource_id: desk_id,
        user_id,
        range: TimeRange::new(start, end).unwrap(),
        title: None,
        attendees: Vec::new(),
    }
}

pub fn room_booking(
    room_id: DbId,
    user_id: DbId,
    start: Timestamp,
    end: Timestamp,
    attendees: usize,
) -> CreateBooking {
    CreateBooking {
        booking_type: BookingType::Meeting,
        resource_id: room_id,
        user_id,
        range: TimeRange::new(start, end).unwrap(),
        title: Some("Planning".into()),
        attendees: (0..attendees).map(|i| format!("person{i}@example.com")).collect(),
    }
}
