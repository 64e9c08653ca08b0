//! The detector seam used by check-in.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use officehub_core::compliance::{DetectionOutcome, MaskVerdict};

use crate::client::{DetectionError, DetectorHealth};

/// Something that can classify a webcam frame.
#[async_trait]
pub trait MaskDetector: Send + Sync {
    /// Classify a base64 data URL image.
    async fn detect(&self, image: &str) -> Result<MaskVerdict, DetectionError>;

    async fn health(&self) -> Result<DetectorHealth, DetectionError>;
}

/// Obtain a detection outcome for a check-in.
///
/// Never fails: a missing image, a missing detector, an error or an elapsed
/// `timeout` are all reported as outcomes for the compliance policy to
/// resolve.
pub async fn detect_with_timeout(
    detector: Option<&Arc<dyn MaskDetector>>,
    image: Option<&str>,
    timeout: Duration,
) -> DetectionOutcome {
    let Some(image) = image.filter(|i| !i.trim().is_empty()) else {
        return DetectionOutcome::NoImage;
    };
    let Some(detector) = detector else {
        return DetectionOutcome::Unavailable("detection service not configured".to_string());
    };

    let result = match tokio::time::timeout(timeout, detector.detect(image)).await {
        Ok(result) => result,
        Err(_) => Err(DetectionError::Timeout(timeout)),
    };

    match result {
        Ok(verdict) => DetectionOutcome::Verdict(verdict),
        Err(e) => {
            tracing::warn!(error = %e, "Mask detection unavailable");
            DetectionOutcome::Unavailable(e.to_string())
        }
    }
}
