//! Notification kinds and the messages raised by booking and attendance
//! events.

use serde::{Deserialize, Serialize};

use crate::booking::{BookingType, TimeRange};

/// Maximum page size for notification listing.
pub const MAX_PAGE_SIZE: usize = 100;

/// Default page size for notification listing.
pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Booking,
    Attendance,
    Alert,
}

/// A notification before it is assigned an id and owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

fn window(range: &TimeRange) -> String {
    format!(
        "{} to {}",
        range.start.format("%Y-%m-%d %H:%M"),
        range.end.format("%Y-%m-%d %H:%M")
    )
}

fn resource_display(booking_type: BookingType, label: &str) -> String {
    match booking_type {
        BookingType::Desk => format!("desk {label}"),
        BookingType::Meeting => label.to_string(),
    }
}

pub fn booking_confirmed(
    booking_type: BookingType,
    resource_label: &str,
    range: &TimeRange,
) -> NotificationDraft {
    NotificationDraft {
        kind: NotificationKind::Booking,
        title: "Booking confirmed".into(),
        message: format!(
            "Your booking of {} from {} (UTC) is confirmed",
            resource_display(booking_type, resource_label),
            window(range)
        ),
    }
}

pub fn booking_cancelled(
    booking_type: BookingType,
    resource_label: &str,
    range: &TimeRange,
    by_owner: bool,
) -> NotificationDraft {
    let suffix = if by_owner { "" } else { " by an administrator" };
    NotificationDraft {
        kind: NotificationKind::Booking,
        title: "Booking cancelled".into(),
        message: format!(
            "Your booking of {} from {} (UTC) was cancelled{suffix}",
            resource_display(booking_type, resource_label),
            window(range)
        ),
    }
}

pub fn checked_in(desk_label: &str) -> NotificationDraft {
    NotificationDraft {
        kind: NotificationKind::Attendance,
        title: "Checked in".into(),
        message: format!("You are checked in at desk {desk_label}"),
    }
}

pub fn checked_out(desk_label: &str, duration_secs: i64) -> NotificationDraft {
    let hours = duration_secs / 3600;
    let minutes = (duration_secs % 3600) / 60;
    NotificationDraft {
        kind: NotificationKind::Attendance,
        title: "Checked out".into(),
        message: format!("You checked out of desk {desk_label} after {hours}h {minutes:02}m"),
    }
}

pub fn compliance_alert(alert_message: &str) -> NotificationDraft {
    NotificationDraft {
        kind: NotificationKind::Alert,
        title: "Mask compliance alert".into(),
        message: alert_message.to_string(),
    }
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}
