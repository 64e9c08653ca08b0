//! Desk attendance (presence) records.

use officehub_core::attendance::{PresenceRecord, PresenceStatus};
use officehub_core::compliance::{ComplianceDecision, MaskCompliance};
use officehub_core::types::{DbId, Timestamp};
use serde::Serialize;

use super::alert::Alert;
use super::notification::Notification;

#[derive(Debug, Clone, Serialize)]
pub struct Presence {
    pub id: DbId,
    pub user_id: DbId,
    pub desk_id: DbId,
    /// The caller's own desk booking covering the check-in, if any.
    pub booking_id: Option<DbId>,
    pub check_in: Timestamp,
    pub check_out: Option<Timestamp>,
    pub duration_secs: Option<i64>,
    pub status: PresenceStatus,
    pub mask_compliance: MaskCompliance,
    pub detection_confidence: Option<f64>,
}

impl PresenceRecord for Presence {
    fn presence_id(&self) -> DbId {
        self.id
    }

    fn desk_id(&self) -> DbId {
        self.desk_id
    }

    fn user_id(&self) -> DbId {
        self.user_id
    }

    fn status(&self) -> PresenceStatus {
        self.status
    }

    fn check_in(&self) -> Timestamp {
        self.check_in
    }

    fn check_out(&self) -> Option<Timestamp> {
        self.check_out
    }

    fn mask_compliance(&self) -> MaskCompliance {
        self.mask_compliance
    }
}

/// DTO for recording a check-in.
#[derive(Debug, Clone, Copy)]
pub struct CheckIn {
    pub desk_id: DbId,
    pub user_id: DbId,
    pub compliance: ComplianceDecision,
}

/// Everything a check-in created in its unit of work.
#[derive(Debug, Clone)]
pub struct CheckInOutcome {
    pub presence: Presence,
    pub alert: Option<Alert>,
    pub notifications: Vec<Notification>,
}
