use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use officehub_core::catalog::generate_layout;
use officehub_core::error::CoreError;
use officehub_core::roles::ROLE_ADMIN;
use officehub_db::models::user::CreateUser;
use officehub_db::repositories::{CatalogRepo, UserRepo};
use officehub_detection::{DetectionClient, MaskDetector};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use officehub_api::auth::password::hash_password;
use officehub_api::config::{AdminSeed, ServerConfig};
use officehub_api::router::build_app_router;
use officehub_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "officehub_api=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let pool = officehub_db::create_pool();
    let counts = CatalogRepo::seed(&pool, &generate_layout(&config.catalog)).await;
    tracing::info!(
        offices = counts.offices,
        floors = counts.floors,
        desks = counts.desks,
        rooms = counts.rooms,
        "Resource catalog seeded"
    );

    if let Some(seed) = &config.admin {
        seed_admin(&pool, seed).await;
    }

    // --- Event bus ---
    let event_bus = Arc::new(officehub_events::EventBus::default());
    let persistence_handle = tokio::spawn(officehub_events::EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));
    tracing::info!("Event persistence started");

    // --- Mask detection ---
    let detector: Option<Arc<dyn MaskDetector>> = match &config.detection.url {
        Some(url) => {
            let client = DetectionClient::new(url.clone(), config.detection.timeout())
                .expect("Failed to build detection HTTP client");
            tracing::info!(
                url = %url,
                policy = ?config.detection.failure_policy,
                "Mask detection enabled"
            );
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!(
                policy = ?config.detection.failure_policy,
                "DETECTION_URL not set; check-ins follow the failure policy"
            );
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        detector,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last sender closes the channel; persistence drains and exits.
    drop(event_bus);
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, persistence_handle).await.is_err() {
        tracing::warn!("Event persistence did not drain before the shutdown timeout");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Create the configured administrator unless the email is already taken.
async fn seed_admin(pool: &officehub_db::DbPool, seed: &AdminSeed) {
    let password_hash = hash_password(&seed.password).expect("Failed to hash admin password");
    let input = CreateUser {
        name: seed.name.clone(),
        email: seed.email.clone(),
        password_hash,
        role: ROLE_ADMIN.to_string(),
        organization: String::new(),
    };
    match UserRepo::create(pool, &input, chrono::Utc::now()).await {
        Ok(user) => tracing::info!(user_id = user.id, email = %user.email, "Administrator created"),
        Err(CoreError::Conflict(_)) => {
            tracing::debug!(email = %seed.email, "Administrator already exists")
        }
        Err(e) => panic!("Failed to create administrator: {e}"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
