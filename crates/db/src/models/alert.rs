//! Compliance alerts.

use officehub_core::alert::AlertSeverity;
use officehub_core::types::{DbId, Timestamp};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub user_id: DbId,
    pub presence_id: DbId,
    pub desk_id: DbId,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub resolved: bool,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// Filters for listing alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertFilter {
    pub user_id: Option<DbId>,
    pub resolved: Option<bool>,
}
