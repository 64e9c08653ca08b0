//! Names of the events published on the bus.

pub const BOOKING_CREATED: &str = "booking.created";
pub const BOOKING_CANCELLED: &str = "booking.cancelled";
pub const ATTENDANCE_CHECKED_IN: &str = "attendance.checked_in";
pub const ATTENDANCE_CHECKED_OUT: &str = "attendance.checked_out";
pub const ALERT_RAISED: &str = "alert.raised";
pub const ALERT_RESOLVED: &str = "alert.resolved";
pub const USER_REGISTERED: &str = "user.registered";
pub const USER_ROLE_CHANGED: &str = "user.role_changed";
pub const DESK_STATUS_CHANGED: &str = "desk.status_changed";
pub const ROOM_STATUS_CHANGED: &str = "room.status_changed";

pub const ALL: &[&str] = &[
    BOOKING_CREATED,
    BOOKING_CANCELLED,
    ATTENDANCE_CHECKED_IN,
    ATTENDANCE_CHECKED_OUT,
    ALERT_RAISED,
    ALERT_RESOLVED,
    USER_REGISTERED,
    USER_ROLE_CHANGED,
    DESK_STATUS_CHANGED,
    ROOM_STATUS_CHANGED,
];

pub fn is_known(event_type: &str) -> bool {
    ALL.contains(&event_type)
}
