use std::sync::Arc;

use officehub_detection::MaskDetector;
use officehub_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: officehub_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Publishes domain events after a unit of work commits.
    pub event_bus: Arc<EventBus>,
    /// Mask detector; `None` when `DETECTION_URL` is unset.
    pub detector: Option<Arc<dyn MaskDetector>>,
}
