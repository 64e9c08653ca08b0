//! Mask compliance resolution for desk check-in.
//!
//! The detection service is optional and can fail. [`CompliancePolicy`]
//! decides what gets recorded when no verdict is available:
//!
//! | Policy        | No verdict (no image, disabled, error, timeout) |
//! |---------------|--------------------------------------------------|
//! | `fail_open`   | record `compliant` and continue (default)        |
//! | `unknown`     | record `unknown` and continue, no alert          |
//! | `fail_closed` | reject the check-in                              |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Compliance recorded on a presence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskCompliance {
    Compliant,
    NonCompliant,
    Unknown,
}

/// A classification returned by the detection service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaskVerdict {
    pub wearing_mask: bool,
    /// Probability of the predicted label, `0.0..=1.0`.
    pub confidence: f64,
}

/// Result of trying to obtain a verdict for a check-in.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    Verdict(MaskVerdict),
    /// The caller did not supply an image.
    NoImage,
    /// The detector is disabled, unreachable, timed out or returned an error.
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompliancePolicy {
    #[default]
    FailOpen,
    Unknown,
    FailClosed,
}

impl CompliancePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CompliancePolicy::FailOpen => "fail_open",
            CompliancePolicy::Unknown => "unknown",
            CompliancePolicy::FailClosed => "fail_closed",
        }
    }
}

impl fmt::Display for CompliancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompliancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail_open" => Ok(CompliancePolicy::FailOpen),
            "unknown" => Ok(CompliancePolicy::Unknown),
            "fail_closed" => Ok(CompliancePolicy::FailClosed),
            other => Err(format!(
                "Invalid compliance policy '{other}'. Must be one of: fail_open, unknown, fail_closed"
            )),
        }
    }
}

/// What the check-in records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplianceDecision {
    pub compliance: MaskCompliance,
    pub confidence: Option<f64>,
}

impl ComplianceDecision {
    pub fn is_violation(&self) -> bool {
        self.compliance == MaskCompliance::NonCompliant
    }
}

/// Turn a detection outcome into the compliance to record.
pub fn resolve_compliance(
    outcome: &DetectionOutcome,
    policy: CompliancePolicy,
) -> Result<ComplianceDecision, CoreError> {
    match (outcome, policy) {
        (DetectionOutcome::Verdict(verdict), _) => Ok(ComplianceDecision {
            compliance: if verdict.wearing_mask {
                MaskCompliance::Compliant
            } else {
                MaskCompliance::NonCompliant
            },
            confidence: Some(verdict.confidence),
        }),
        (_, CompliancePolicy::FailOpen) => Ok(ComplianceDecision {
            compliance: MaskCompliance::Compliant,
            confidence: None,
        }),
        (_, CompliancePolicy::Unknown) => Ok(ComplianceDecision {
            compliance: MaskCompliance::Unknown,
            confidence: None,
        }),
        (DetectionOutcome::NoImage, CompliancePolicy::FailClosed) => Err(CoreError::Validation(
            "A face image is required to check in".into(),
        )),
        (DetectionOutcome::Unavailable(reason), CompliancePolicy::FailClosed) => Err(
            CoreError::UpstreamUnavailable(format!("Mask detection unavailable: {reason}")),
        ),
    }
}
