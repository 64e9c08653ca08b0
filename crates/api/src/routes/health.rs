use axum::extract::State;
use axum::{routing::get, Json, Router};
use officehub_db::StoreStats;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when a configured detector is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub store: StoreStats,
    pub detector: DetectorStatus,
}

#[derive(Serialize)]
pub struct DetectorStatus {
    pub configured: bool,
    pub healthy: bool,
    /// Whether the detection model reported itself as loaded.
    pub model_loaded: Option<bool>,
}

/// GET /health -- returns service, store and detector health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = officehub_db::store_stats(&state.pool).await;

    let detector = match &state.detector {
        None => DetectorStatus {
            configured: false,
            healthy: false,
            model_loaded: None,
        },
        Some(detector) => match tokio::time::timeout(
            state.config.detection.timeout(),
            detector.health(),
        )
        .await
        {
            Ok(Ok(health)) => DetectorStatus {
                configured: true,
                healthy: health.status == "healthy",
                model_loaded: Some(health.model_loaded),
            },
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Detection service health check failed");
                DetectorStatus {
                    configured: true,
                    healthy: false,
                    model_loaded: None,
                }
            }
            Err(_) => {
                tracing::warn!("Detection service health check timed out");
                DetectorStatus {
                    configured: true,
                    healthy: false,
                    model_loaded: None,
                }
            }
        },
    };

    let status = if detector.configured && !detector.healthy {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store,
        detector,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
