//! Read-only dashboard aggregations over bookings, presence and desks.

use serde::Serialize;

use crate::attendance::PresenceRecord;
use crate::booking::{BookingStatus, BookingType, Reservation, TimeRange};
use crate::catalog::DeskStatus;
use crate::compliance::MaskCompliance;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeskUtilization {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub maintenance: usize,
    /// Occupied desks over desks in service; `0.0` when none are in service.
    pub occupancy_rate: f64,
}

pub fn desk_utilization<I>(statuses: I) -> DeskUtilization
where
    I: IntoIterator<Item = DeskStatus>,
{
    let mut u = DeskUtilization::default();
    for status in statuses {
        u.total += 1;
        match status {
            DeskStatus::Available => u.available += 1,
            DeskStatus::Occupied => u.occupied += 1,
            DeskStatus::Maintenance => u.maintenance += 1,
        }
    }
    let in_service = u.total - u.maintenance;
    if in_service > 0 {
        u.occupancy_rate = u.occupied as f64 / in_service as f64;
    }
    u
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub total: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub desk: usize,
    pub meeting: usize,
}

/// Count bookings whose interval overlaps `window`.
pub fn booking_summary<'a, R, I>(bookings: I, window: &TimeRange) -> BookingSummary
where
    R: Reservation + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut s = BookingSummary::default();
    for b in bookings.into_iter().filter(|b| b.range().overlaps(window)) {
        s.total += 1;
        match b.status() {
            BookingStatus::Confirmed => s.confirmed += 1,
            BookingStatus::Cancelled => s.cancelled += 1,
        }
        match b.booking_type() {
            BookingType::Desk => s.desk += 1,
            BookingType::Meeting => s.meeting += 1,
        }
    }
    s
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplianceSummary {
    pub check_ins: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub unknown: usize,
    /// Compliant over classified check-ins; `None` when nothing was classified.
    pub compliance_rate: Option<f64>,
}

/// Summarise mask compliance over check-ins that started inside `window`.
pub fn compliance_summary<'a, P, I>(records: I, window: &TimeRange) -> ComplianceSummary
where
    P: PresenceRecord + 'a,
    I: IntoIterator<Item = &'a P>,
{
    let mut s = ComplianceSummary::default();
    for p in records.into_iter().filter(|p| window.contains(p.check_in())) {
        s.check_ins += 1;
        match p.mask_compliance() {
            MaskCompliance::Compliant => s.compliant += 1,
            MaskCompliance::NonCompliant => s.non_compliant += 1,
            MaskCompliance::Unknown => s.unknown += 1,
        }
    }
    let classified = s.compliant + s.non_compliant;
    if classified > 0 {
        s.compliance_rate = Some(s.compliant as f64 / classified as f64);
    }
    s
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub total_bookings: usize,
    pub upcoming_bookings: usize,
    pub cancelled_bookings: usize,
    pub check_ins: usize,
    pub hours_in_office: f64,
}

/// Personal statistics for one user. Active presence counts up to `now`.
pub fn user_stats<'a, R, P, IR, IP>(
    bookings: IR,
    presence: IP,
    user_id: DbId,
    now: Timestamp,
) -> UserStats
where
    R: Reservation + 'a,
    P: PresenceRecord + 'a,
    IR: IntoIterator<Item = &'a R>,
    IP: IntoIterator<Item = &'a P>,
{
    let mut s = UserStats::default();
    for b in bookings.into_iter().filter(|b| b.owner_id() == user_id) {
        s.total_bookings += 1;
        match b.status() {
            BookingStatus::Cancelled => s.cancelled_bookings += 1,
            BookingStatus::Confirmed if b.range().end > now => s.upcoming_bookings += 1,
            BookingStatus::Confirmed => {}
        }
    }
    let mut seconds = 0i64;
    for p in presence.into_iter().filter(|p| p.user_id() == user_id) {
        s.check_ins += 1;
        let end = p.check_out().unwrap_or(now).max(p.check_in());
        seconds += (end - p.check_in()).num_seconds();
    }
    s.hours_in_office = seconds as f64 / 3600.0;
    s
}
