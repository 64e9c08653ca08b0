//! Dashboard aggregations computed over a consistent snapshot.

use officehub_core::analytics::{
    booking_summary, compliance_summary, desk_utilization, user_stats, BookingSummary,
    ComplianceSummary, DeskUtilization, UserStats,
};
use officehub_core::attendance::PresenceStatus;
use officehub_core::booking::TimeRange;
use officehub_core::types::{DbId, Timestamp};
use serde::Serialize;

use crate::Database;

/// Organisation-wide dashboard figures.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub window: TimeRange,
    pub desks: DeskUtilization,
    pub active_presence: usize,
    pub bookings: BookingSummary,
    pub compliance: ComplianceSummary,
    pub open_alerts: usize,
}

/// Current desk utilisation of one office.
#[derive(Debug, Clone, Serialize)]
pub struct OfficeOccupancy {
    pub office_id: DbId,
    pub office_name: String,
    pub city: String,
    pub desks: DeskUtilization,
    pub rooms: usize,
}

pub struct AnalyticsRepo;

impl AnalyticsRepo {
    pub async fn overview(db: &Database, window: &TimeRange) -> Overview {
        let tables = db.read().await;
        Overview {
            window: *window,
            desks: desk_utilization(tables.desks.iter().map(|d| d.status)),
            active_presence: tables
                .presence
                .iter()
                .filter(|p| p.status == PresenceStatus::Active)
                .count(),
            bookings: booking_summary(&tables.bookings, window),
            compliance: compliance_summary(&tables.presence, window),
            open_alerts: tables.alerts.iter().filter(|a| !a.resolved).count(),
        }
    }

    pub async fn office_breakdown(db: &Database) -> Vec<OfficeOccupancy> {
        let tables = db.read().await;
        tables
            .offices
            .iter()
            .map(|office| OfficeOccupancy {
                office_id: office.id,
                office_name: office.name.clone(),
                city: office.city.clone(),
                desks: desk_utilization(
                    tables
                        .desks
                        .iter()
                        .filter(|d| d.office_id == office.id)
                        .map(|d| d.status),
                ),
                rooms: tables
                    .rooms
                    .iter()
                    .filter(|r| r.office_id == office.id)
                    .count(),
            })
            .collect()
    }

    pub async fn user_stats(db: &Database, user_id: DbId, now: Timestamp) -> UserStats {
        let tables = db.read().await;
        user_stats(&tables.bookings, &tables.presence, user_id, now)
    }
}
