//! REST client for the mask detection service.
//!
//! | Method | Path      | Body                  |
//! |--------|-----------|-----------------------|
//! | POST   | `/webcam` | `{"image": data_url}` |
//! | GET    | `/health` |                       |

use std::time::Duration;

use async_trait::async_trait;
use officehub_core::compliance::MaskVerdict;
use serde::{Deserialize, Serialize};

use crate::detector::MaskDetector;

/// Label the service returns for a face wearing a mask.
const WEARING_MASK: &str = "Wearing Mask";
/// Label the service returns for a face without a mask.
const NOT_WEARING_MASK: &str = "Not Wearing Mask";

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    /// The HTTP request itself failed (network, DNS, client timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Detection API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The service answered 2xx but reported a failure.
    #[error("Detection service error: {0}")]
    Service(String),

    /// The call did not finish within the configured timeout.
    #[error("Detection timed out after {0:?}")]
    Timeout(Duration),

    /// The response body did not have the expected shape.
    #[error("Invalid detection response: {0}")]
    InvalidResponse(String),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct WebcamRequest<'a> {
    image: &'a str,
}

#[derive(Debug, Deserialize)]
struct WebcamResponse {
    #[serde(default)]
    success: bool,
    prediction: Option<Prediction>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    result: String,
    confidence: f64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub service: Option<String>,
}

// ---------------------------------------------------------------------------
// DetectionClient
// ---------------------------------------------------------------------------

/// HTTP client for one detection service instance.
pub struct DetectionClient {
    client: reqwest::Client,
    base_url: String,
}

impl DetectionClient {
    /// Create a client whose requests are bounded by `timeout`.
    ///
    /// * `base_url` - e.g. `http://localhost:5001`; a trailing slash is
    ///   ignored.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DetectionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify one image.
    pub async fn classify(&self, image: &str) -> Result<MaskVerdict, DetectionError> {
        let response = self
            .client
            .post(format!("{}/webcam", self.base_url))
            .json(&WebcamRequest { image })
            .send()
            .await?;

        let body: WebcamResponse = Self::parse_response(response).await?;
        parse_verdict(body)
    }

    /// Query the service health endpoint.
    pub async fn fetch_health(&self) -> Result<DetectorHealth, DetectionError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, DetectionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DetectionError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DetectionError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MaskDetector for DetectionClient {
    async fn detect(&self, image: &str) -> Result<MaskVerdict, DetectionError> {
        self.classify(image).await
    }

    async fn health(&self) -> Result<DetectorHealth, DetectionError> {
        self.fetch_health().await
    }
}

fn parse_verdict(body: WebcamResponse) -> Result<MaskVerdict, DetectionError> {
    if let Some(error) = body.error {
        return Err(DetectionError::Service(error));
    }
    let prediction = match body.prediction {
        Some(p) if body.success => p,
        _ => {
            return Err(DetectionError::InvalidResponse(
                "missing prediction".to_string(),
            ))
        }
    };
    let wearing_mask = match prediction.result.as_str() {
        WEARING_MASK => true,
        NOT_WEARING_MASK => false,
        other => {
            return Err(DetectionError::InvalidResponse(format!(
                "unexpected result label '{other}'"
            )))
        }
    };
    if !(0.0..=1.0).contains(&prediction.confidence) {
        return Err(DetectionError::InvalidResponse(format!(
            "confidence {} out of range",
            prediction.confidence
        )));
    }
    Ok(MaskVerdict {
        wearing_mask,
        confidence: prediction.confidence,
    })
}
