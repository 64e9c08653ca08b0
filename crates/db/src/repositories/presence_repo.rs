//! Repository for the `presence` table (desk attendance).

use officehub_core::alert::{mask_violation_message, severity_for_confidence, ALERT_MASK_VIOLATION};
use officehub_core::attendance::{
    complete, validate_check_in, validate_check_out, CheckInContext, PresenceStatus,
};
use officehub_core::catalog::DeskStatus;
use officehub_core::error::CoreError;
use officehub_core::notification;
use officehub_core::types::{DbId, Timestamp};

use super::notification_repo::NotificationRepo;
use crate::models::alert::Alert;
use crate::models::catalog::Desk;
use crate::models::presence::{CheckIn, CheckInOutcome, Presence};
use crate::{Database, Tables};

/// Provides check-in / check-out and attendance queries.
pub struct PresenceRepo;

impl PresenceRepo {
    /// Validate a check-in without recording anything.
    ///
    /// Run before calling the detection service so a doomed check-in does
    /// not cost a detection round-trip. [`PresenceRepo::check_in`] repeats
    /// the same validation under the write lock.
    pub async fn precheck(
        db: &Database,
        desk_id: DbId,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<Desk, CoreError> {
        let tables = db.read().await;
        let desk = Self::validate(&tables, desk_id, user_id, now)?.0;
        Ok(desk.clone())
    }

    /// Record a check-in as one unit of work.
    ///
    /// Inserts the active presence record, marks the desk occupied, notifies
    /// the user and, on a mask violation, raises an alert with its own
    /// notification. Either all of it happens or none of it does.
    pub async fn check_in(
        db: &Database,
        input: &CheckIn,
        now: Timestamp,
    ) -> Result<CheckInOutcome, CoreError> {
        let mut tables = db.write().await;

        let (desk, booking_id) = Self::validate(&tables, input.desk_id, input.user_id, now)?;
        let desk_label = desk.label.clone();

        let presence = tables
            .presence
            .insert_with(|id| Presence {
                id,
                user_id: input.user_id,
                desk_id: input.desk_id,
                booking_id,
                check_in: now,
                check_out: None,
                duration_secs: None,
                status: PresenceStatus::Active,
                mask_compliance: input.compliance.compliance,
                detection_confidence: input.compliance.confidence,
            })
            .clone();

        if let Some(desk) = tables.desks.get_mut(input.desk_id) {
            desk.status = DeskStatus::Occupied;
        }

        let mut notifications = vec![NotificationRepo::push(
            &mut tables,
            input.user_id,
            notification::checked_in(&desk_label),
            now,
        )];

        let alert = if input.compliance.is_violation() {
            let message = mask_violation_message(&desk_label, input.compliance.confidence);
            let alert = tables
                .alerts
                .insert_with(|id| Alert {
                    id,
                    user_id: input.user_id,
                    presence_id: presence.id,
                    desk_id: input.desk_id,
                    alert_type: ALERT_MASK_VIOLATION.to_string(),
                    severity: severity_for_confidence(input.compliance.confidence),
                    message: message.clone(),
                    resolved: false,
                    resolved_at: None,
                    resolved_by: None,
                    created_at: now,
                })
                .clone();
            notifications.push(NotificationRepo::push(
                &mut tables,
                input.user_id,
                notification::compliance_alert(&message),
                now,
            ));
            Some(alert)
        } else {
            None
        };

        Ok(CheckInOutcome {
            presence,
            alert,
            notifications,
        })
    }

    /// Complete the caller's active presence record and free the desk.
    pub async fn check_out(
        db: &Database,
        attendance_id: DbId,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<Presence, CoreError> {
        let mut tables = db.write().await;

        validate_check_out(tables.presence.get(attendance_id), attendance_id, user_id)?;

        let Some(record) = tables.presence.get_mut(attendance_id) else {
            return Err(CoreError::NotFound {
                entity: "Active attendance",
                id: attendance_id,
            });
        };
        let (check_out, duration_secs) = complete(record.check_in, now);
        record.check_out = Some(check_out);
        record.duration_secs = Some(duration_secs);
        record.status = PresenceStatus::Completed;
        let record = record.clone();

        let desk_label = match tables.desks.get_mut(record.desk_id) {
            Some(desk) => {
                desk.status = DeskStatus::Available;
                desk.label.clone()
            }
            None => record.desk_id.to_string(),
        };

        NotificationRepo::push(
            &mut tables,
            user_id,
            notification::checked_out(&desk_label, duration_secs),
            now,
        );

        Ok(record)
    }

    pub async fn find_by_id(db: &Database, id: DbId) -> Option<Presence> {
        db.read().await.presence.get(id).cloned()
    }

    /// The user's active presence record, if checked in.
    pub async fn find_active_for_user(db: &Database, user_id: DbId) -> Option<Presence> {
        db.read()
            .await
            .presence
            .iter()
            .find(|p| p.user_id == user_id && p.status == PresenceStatus::Active)
            .cloned()
    }

    /// A user's attendance history, newest first.
    pub async fn list_for_user(
        db: &Database,
        user_id: DbId,
        limit: usize,
        offset: usize,
    ) -> Vec<Presence> {
        let tables = db.read().await;
        tables
            .presence
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    /// All active presence records, optionally limited to one office.
    pub async fn list_active(db: &Database, office_id: Option<DbId>) -> Vec<Presence> {
        let tables = db.read().await;
        tables
            .presence
            .iter()
            .filter(|p| p.status == PresenceStatus::Active)
            .filter(|p| {
                office_id.map_or(true, |o| {
                    tables.desks.get(p.desk_id).is_some_and(|d| d.office_id == o)
                })
            })
            .cloned()
            .collect()
    }

    // ---- private helpers ----

    fn validate<'t>(
        tables: &'t Tables,
        desk_id: DbId,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<(&'t Desk, Option<DbId>), CoreError> {
        let desk = tables.desks.get(desk_id).ok_or(CoreError::NotFound {
            entity: "Desk",
            id: desk_id,
        })?;
        let booking_id = validate_check_in(&CheckInContext {
            desk_id,
            desk_status: desk.status,
            user_id,
            presence: tables.presence.as_slice(),
            bookings: tables.bookings.as_slice(),
            now,
        })?;
        Ok((desk, booking_id))
    }
}
