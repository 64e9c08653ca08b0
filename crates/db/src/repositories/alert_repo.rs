//! Repository for the `alerts` table.

use officehub_core::alert::validate_resolution;
use officehub_core::error::CoreError;
use officehub_core::types::{DbId, Timestamp};

use crate::models::alert::{Alert, AlertFilter};
use crate::Database;

pub struct AlertRepo;

impl AlertRepo {
    /// List alerts, newest first.
    pub async fn list(db: &Database, filter: AlertFilter, limit: usize, offset: usize) -> Vec<Alert> {
        let tables = db.read().await;
        tables
            .alerts
            .iter()
            .rev()
            .filter(|a| filter.user_id.map_or(true, |u| a.user_id == u))
            .filter(|a| filter.resolved.map_or(true, |r| a.resolved == r))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn find_by_id(db: &Database, id: DbId) -> Option<Alert> {
        db.read().await.alerts.get(id).cloned()
    }

    /// Mark an alert resolved. Resolving twice is an `InvalidState` error.
    pub async fn resolve(
        db: &Database,
        alert_id: DbId,
        resolved_by: DbId,
        now: Timestamp,
    ) -> Result<Alert, CoreError> {
        let mut tables = db.write().await;
        let alert = tables.alerts.get_mut(alert_id).ok_or(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        })?;
        validate_resolution(alert_id, alert.resolved)?;
        alert.resolved = true;
        alert.resolved_at = Some(now);
        alert.resolved_by = Some(resolved_by);
        Ok(alert.clone())
    }

    /// Number of unresolved alerts.
    pub async fn open_count(db: &Database) -> usize {
        db.read().await.alerts.iter().filter(|a| !a.resolved).count()
    }
}
