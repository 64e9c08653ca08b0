//! Desk attendance state machine.
//!
//! ```text
//! (no record) --check-in--> active --check-out--> completed
//! ```
//!
//! A desk has at most one active record, and so does a user. Completed
//! records are never modified again.

use serde::{Deserialize, Serialize};

use crate::booking::{find_covering, BookingType, Reservation};
use crate::catalog::DeskStatus;
use crate::compliance::MaskCompliance;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Active,
    Completed,
}

/// Read access to a stored presence record.
pub trait PresenceRecord {
    fn presence_id(&self) -> DbId;
    fn desk_id(&self) -> DbId;
    fn user_id(&self) -> DbId;
    fn status(&self) -> PresenceStatus;
    fn check_in(&self) -> Timestamp;
    fn check_out(&self) -> Option<Timestamp>;
    fn mask_compliance(&self) -> MaskCompliance;

    fn is_active(&self) -> bool {
        self.status() == PresenceStatus::Active
    }
}

pub fn find_active_for_desk<'a, P, I>(records: I, desk_id: DbId) -> Option<&'a P>
where
    P: PresenceRecord + 'a,
    I: IntoIterator<Item = &'a P>,
{
    records
        .into_iter()
        .find(|p| p.is_active() && p.desk_id() == desk_id)
}

pub fn find_active_for_user<'a, P, I>(records: I, user_id: DbId) -> Option<&'a P>
where
    P: PresenceRecord + 'a,
    I: IntoIterator<Item = &'a P>,
{
    records
        .into_iter()
        .find(|p| p.is_active() && p.user_id() == user_id)
}

/// Everything a check-in must be validated against.
pub struct CheckInContext<'a, P, R> {
    pub desk_id: DbId,
    pub desk_status: DeskStatus,
    pub user_id: DbId,
    pub presence: &'a [P],
    pub bookings: &'a [R],
    pub now: Timestamp,
}

/// Validate a check-in and return the caller's own desk booking covering
/// `now`, if there is one.
///
/// Runs once before the detection call and again inside the write lock
/// that records the check-in, so both passes see the same rules.
pub fn validate_check_in<P, R>(ctx: &CheckInContext<'_, P, R>) -> Result<Option<DbId>, CoreError>
where
    P: PresenceRecord,
    R: Reservation,
{
    if ctx.desk_status == DeskStatus::Maintenance {
        return Err(CoreError::Conflict(format!(
            "Desk {} is under maintenance",
            ctx.desk_id
        )));
    }
    if let Some(active) = find_active_for_desk(ctx.presence, ctx.desk_id) {
        return Err(CoreError::Conflict(format!(
            "Desk {} is already occupied (attendance {})",
            ctx.desk_id,
            active.presence_id()
        )));
    }
    if let Some(active) = find_active_for_user(ctx.presence, ctx.user_id) {
        return Err(CoreError::Conflict(format!(
            "Already checked in at desk {}; check out first",
            active.desk_id()
        )));
    }
    match find_covering(ctx.bookings, BookingType::Desk, ctx.desk_id, ctx.now) {
        Some(booking) if booking.owner_id() != ctx.user_id => Err(CoreError::Conflict(format!(
            "Desk {} is reserved by another user until {}",
            ctx.desk_id,
            booking.range().end.to_rfc3339()
        ))),
        Some(booking) => Ok(Some(booking.booking_id())),
        None => Ok(None),
    }
}

/// Validate that `requester` may check out `record`.
///
/// Records that are not active, or belong to someone else, are reported as
/// not found so their existence is not disclosed.
pub fn validate_check_out<P: PresenceRecord>(
    record: Option<&P>,
    attendance_id: DbId,
    requester_id: DbId,
) -> Result<(), CoreError> {
    match record {
        Some(r) if r.is_active() && r.user_id() == requester_id => Ok(()),
        _ => Err(CoreError::NotFound {
            entity: "Active attendance",
            id: attendance_id,
        }),
    }
}

/// Compute the check-out instant and duration for a record checked in at
/// `check_in`. A clock that went backwards clamps to a zero duration.
pub fn complete(check_in: Timestamp, now: Timestamp) -> (Timestamp, i64) {
    let check_out = now.max(check_in);
    (check_out, (check_out - check_in).num_seconds())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::booking::{BookingStatus, TimeRange};

    struct Rec {
        id: DbId,
        desk: DbId,
        user: DbId,
        status: PresenceStatus,
    }

    impl PresenceRecord for Rec {
        fn presence_id(&self) -> DbId {
            self.id
        }
        fn desk_id(&self) -> DbId {
            self.desk
        }
        fn user_id(&self) -> DbId {
            self.user
        }
        fn status(&self) -> PresenceStatus {
            self.status
        }
        fn check_in(&self) -> Timestamp {
            now()
        }
        fn check_out(&self) -> Option<Timestamp> {
            None
        }
        fn mask_compliance(&self) -> MaskCompliance {
            MaskCompliance::Compliant
        }
    }

    struct Res {
        id: DbId,
        desk: DbId,
        owner: DbId,
    }

    impl Reservation for Res {
        fn booking_id(&self) -> DbId {
            self.id
        }
        fn booking_type(&self) -> BookingType {
            BookingType::Desk
        }
        fn resource_id(&self) -> DbId {
            self.desk
        }
        fn owner_id(&self) -> DbId {
            self.owner
        }
        fn status(&self) -> BookingStatus {
            BookingStatus::Confirmed
        }
        fn range(&self) -> TimeRange {
            TimeRange::new(now() - Duration::hours(1), now() + Duration::hours(1)).unwrap()
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2030, 3, 4, 9, 30, 0).unwrap()
    }

    fn ctx<'a>(presence: &'a [Rec], bookings: &'a [Res]) -> CheckInContext<'a, Rec, Res> {
        CheckInContext {
            desk_id: 5,
            desk_status: DeskStatus::Available,
            user_id: 1,
            presence,
            bookings,
            now: now(),
        }
    }

    #[test]
    fn free_desk_accepts_check_in() {
        assert_eq!(validate_check_in(&ctx(&[], &[])).unwrap(), None);
    }

    #[test]
    fn occupied_desk_rejected() {
        let presence = [Rec { id: 1, desk: 5, user: 2, status: PresenceStatus::Active }];
        assert_matches!(validate_check_in(&ctx(&presence, &[])), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn completed_record_does_not_block() {
        let presence = [Rec { id: 1, desk: 5, user: 1, status: PresenceStatus::Completed }];
        assert!(validate_check_in(&ctx(&presence, &[])).is_ok());
    }

    #[test]
    fn user_already_checked_in_elsewhere_rejected() {
        let presence = [Rec { id: 1, desk: 9, user: 1, status: PresenceStatus::Active }];
        assert_matches!(
            validate_check_in(&ctx(&presence, &[])),
            Err(CoreError::Conflict(msg)) if msg.contains("desk 9")
        );
    }

    #[test]
    fn maintenance_desk_rejected() {
        let mut c = ctx(&[], &[]);
        c.desk_status = DeskStatus::Maintenance;
        assert_matches!(validate_check_in(&c), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn own_booking_is_linked() {
        let bookings = [Res { id: 44, desk: 5, owner: 1 }];
        assert_eq!(validate_check_in(&ctx(&[], &bookings)).unwrap(), Some(44));
    }

    #[test]
    fn someone_elses_booking_blocks() {
        let bookings = [Res { id: 44, desk: 5, owner: 2 }];
        assert_matches!(
            validate_check_in(&ctx(&[], &bookings)),
            Err(CoreError::Conflict(msg)) if msg.contains("reserved")
        );
    }

    #[test]
    fn check_out_requires_active_own_record() {
        let mine = Rec { id: 3, desk: 5, user: 1, status: PresenceStatus::Active };
        assert!(validate_check_out(Some(&mine), 3, 1).is_ok());
        assert_matches!(validate_check_out(Some(&mine), 3, 2), Err(CoreError::NotFound { .. }));
        assert_matches!(validate_check_out::<Rec>(None, 3, 1), Err(CoreError::NotFound { .. }));

        let done = Rec { id: 3, desk: 5, user: 1, status: PresenceStatus::Completed };
        assert_matches!(validate_check_out(Some(&done), 3, 1), Err(CoreError::NotFound { .. }));
    }

    #[test]
    fn duration_never_negative() {
        let check_in = now();
        assert_eq!(complete(check_in, check_in + Duration::minutes(90)).1, 5400);
        let (check_out, secs) = complete(check_in, check_in - Duration::seconds(5));
        assert_eq!(check_out, check_in);
        assert_eq!(secs, 0);
    }
}
