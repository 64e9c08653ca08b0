//! Compliance alert types.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Alert type raised when a check-in is classified as not wearing a mask.
pub const ALERT_MASK_VIOLATION: &str = "mask_violation";

/// Verdict confidence at or above which a violation is `High` severity.
pub const HIGH_SEVERITY_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Medium,
    High,
}

/// Severity for a mask violation detected with the given confidence.
pub fn severity_for_confidence(confidence: Option<f64>) -> AlertSeverity {
    match confidence {
        Some(c) if c >= HIGH_SEVERITY_CONFIDENCE => AlertSeverity::High,
        _ => AlertSeverity::Medium,
    }
}

/// Human-readable alert text for a mask violation at a desk.
pub fn mask_violation_message(desk_label: &str, confidence: Option<f64>) -> String {
    match confidence {
        Some(c) => format!(
            "No face mask detected at check-in to desk {desk_label} ({:.0}% confidence)",
            c * 100.0
        ),
        None => format!("No face mask detected at check-in to desk {desk_label}"),
    }
}

/// An alert may be resolved exactly once.
pub fn validate_resolution(alert_id: DbId, already_resolved: bool) -> Result<(), CoreError> {
    if already_resolved {
        return Err(CoreError::InvalidState(format!(
            "Alert {alert_id} is already resolved"
        )));
    }
    Ok(())
}
