//! Activity log writer.
//!
//! [`EventPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and appends every known event to the activity log. It runs as a
//! long-lived background task and exits when the bus is dropped.

use officehub_db::models::activity::{ActivityEvent, CreateActivityEvent};
use officehub_db::repositories::ActivityRepo;
use officehub_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::OfficeEvent;
use crate::event_types;

pub struct EventPersistence;

impl EventPersistence {
    /// Run the persistence loop until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<OfficeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if Self::persist(&pool, event.clone()).await.is_none() {
                        tracing::warn!(
                            event_type = %event.event_type,
                            "Unknown event type, not recorded"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Event persistence lagged, some events were not recorded"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Append one event to the activity log. Returns `None` for event types
    /// outside [`event_types::ALL`].
    pub async fn persist(pool: &DbPool, event: OfficeEvent) -> Option<ActivityEvent> {
        if !event_types::is_known(&event.event_type) {
            return None;
        }
        let row = ActivityRepo::record(
            pool,
            CreateActivityEvent {
                event_type: event.event_type,
                source_entity_type: event.source_entity_type,
                source_entity_id: event.source_entity_id,
                actor_user_id: event.actor_user_id,
                payload: event.payload,
                created_at: event.timestamp,
            },
        )
        .await;
        Some(row)
    }
}
