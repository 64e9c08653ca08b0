//! In-memory storage for OfficeHub.
//!
//! All tables live in one [`Tables`] value behind a single `RwLock`. Each
//! repository operation acquires the lock once, so a mutating call is a
//! unit of work: its reads and writes are never interleaved with another
//! request's. A restart discards everything.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub mod models;
pub mod repositories;
pub mod table;

use models::activity::ActivityEvent;
use models::alert::Alert;
use models::booking::Booking;
use models::catalog::{Desk, Floor, Office, Room};
use models::notification::Notification;
use models::presence::Presence;
use models::session::Session;
use models::user::User;
use table::Table;

/// Every table of the application.
#[derive(Debug, Default)]
pub struct Tables {
    pub offices: Table<Office>,
    pub floors: Table<Floor>,
    pub desks: Table<Desk>,
    pub rooms: Table<Room>,
    pub users: Table<User>,
    pub sessions: Table<Session>,
    pub bookings: Table<Booking>,
    pub presence: Table<Presence>,
    pub notifications: Table<Notification>,
    pub alerts: Table<Alert>,
    pub activity: Table<ActivityEvent>,
}

/// The process-wide data store.
#[derive(Debug, Default)]
pub struct Database {
    tables: RwLock<Tables>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared access for queries.
    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Exclusive access for a unit of work.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}

pub type DbPool = Arc<Database>;

/// Create an empty store.
pub fn create_pool() -> DbPool {
    Arc::new(Database::new())
}

/// Row counts reported by the health endpoint.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct StoreStats {
    pub offices: usize,
    pub desks: usize,
    pub rooms: usize,
    pub users: usize,
    pub bookings: usize,
    pub presence: usize,
}

pub async fn store_stats(pool: &Database) -> StoreStats {
    let t = pool.read().await;
    StoreStats {
        offices: t.offices.len(),
        desks: t.desks.len(),
        rooms: t.rooms.len(),
        users: t.users.len(),
        bookings: t.bookings.len(),
        presence: t.presence.len(),
    }
}
