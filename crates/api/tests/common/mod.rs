#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use http_body_util::BodyExt;
use officehub_api::auth::jwt::JwtConfig;
use officehub_api::auth::password::hash_password;
use officehub_api::config::{DetectionConfig, ServerConfig};
use officehub_api::router::build_app_router;
use officehub_api::state::AppState;
use officehub_core::catalog::{generate_layout, CatalogSpec};
use officehub_core::compliance::{CompliancePolicy, MaskVerdict};
use officehub_db::models::user::{CreateUser, User};
use officehub_db::repositories::{CatalogRepo, UserRepo};
use officehub_db::DbPool;
use officehub_detection::{DetectionError, DetectorHealth, MaskDetector};
use officehub_events::EventBus;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse-42";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 1,
        },
        detection: DetectionConfig::default(),
        catalog: test_catalog(),
        admin: None,
    }
}

/// One office with two floors of four desks and two rooms each.
pub fn test_catalog() -> CatalogSpec {
    CatalogSpec {
        offices: vec![("Test Office".into(), "Testville".into())],
        floors_per_office: 2,
        desks_per_floor: 4,
        rooms_per_floor: 2,
    }
}

pub async fn seeded_pool() -> DbPool {
    let pool = officehub_db::create_pool();
    CatalogRepo::seed(&pool, &generate_layout(&test_catalog())).await;
    pool
}

/// Build the full application router with no mask detector configured.
pub fn build_test_app(pool: DbPool) -> Router {
    build_test_app_with(pool, None, CompliancePolicy::FailOpen)
}

/// Build the application with a given detector and failure policy.
///
/// Uses [`build_app_router`] so tests exercise the same middleware stack
/// as production.
pub fn build_test_app_with(
    pool: DbPool,
    detector: Option<Arc<dyn MaskDetector>>,
    policy: CompliancePolicy,
) -> Router {
    let mut config = test_config();
    config.detection.failure_policy = policy;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
        detector,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Mask detector stub
// ---------------------------------------------------------------------------

/// A detector with a fixed answer.
pub struct StubDetector(pub Result<MaskVerdict, String>);

impl StubDetector {
    pub fn wearing(confidence: f64) -> Arc<dyn MaskDetector> {
        Arc::new(Self(Ok(MaskVerdict {
            wearing_mask: true,
            confidence,
        })))
    }

    pub fn not_wearing(confidence: f64) -> Arc<dyn MaskDetector> {
        Arc::new(Self(Ok(MaskVerdict {
            wearing_mask: false,
            confidence,
        })))
    }

    pub fn failing() -> Arc<dyn MaskDetector> {
        Arc::new(Self(Err("model not loaded".into())))
    }
}

#[async_trait]
impl MaskDetector for StubDetector {
    async fn detect(&self, _image: &str) -> Result<MaskVerdict, DetectionError> {
        self.0.clone().map_err(DetectionError::Service)
    }

    async fn health(&self) -> Result<DetectorHealth, DetectionError> {
        match &self.0 {
            Ok(_) => Ok(DetectorHealth {
                status: "healthy".into(),
                model_loaded: true,
                service: Some("stub".into()),
            }),
            Err(e) => Err(DetectionError::Service(e.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Insert a user with [`PASSWORD`] directly into the store.
pub async fn create_user(pool: &DbPool, email: &str, role: &str) -> User {
    let input = CreateUser {
        name: email.split('@').next().unwrap_or(email).to_string(),
        email: email.to_string(),
        password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
        organization: "Test Org".to_string(),
    };
    UserRepo::create(pool, &input, Utc::now())
        .await
        .expect("user creation should succeed")
}

/// Log in via the API and return the access token.
pub async fn login(app: &Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["access_token"]
        .as_str()
        .expect("login must return an access token")
        .to_string()
}

/// Create a user with `role` and return their access token.
pub async fn user_token(pool: &DbPool, app: &Router, email: &str, role: &str) -> String {
    create_user(pool, email, role).await;
    login(app, email).await
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// `hours` from now, truncated to the second.
pub fn from_now(hours: i64) -> DateTime<Utc> {
    let t = Utc::now() + Duration::hours(hours);
    t - Duration::nanoseconds(t.timestamp_subsec_nanos() as i64)
}

/// RFC 3339 with a `Z` suffix, safe to put in a query string.
pub fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

/// POST without a body.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::POST, uri, Some(token), None)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
