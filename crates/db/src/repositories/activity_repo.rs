//! Repository for the activity log written by the event persistence task.

use crate::models::activity::{ActivityEvent, CreateActivityEvent};
use crate::Database;

pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn record(db: &Database, input: CreateActivityEvent) -> ActivityEvent {
        db.write()
            .await
            .activity
            .insert_with(|id| ActivityEvent {
                id,
                event_type: input.event_type,
                source_entity_type: input.source_entity_type,
                source_entity_id: input.source_entity_id,
                actor_user_id: input.actor_user_id,
                payload: input.payload,
                created_at: input.created_at,
            })
            .clone()
    }

    /// Most recent events first, optionally restricted to one event type.
    pub async fn list_recent(
        db: &Database,
        event_type: Option<&str>,
        limit: usize,
    ) -> Vec<ActivityEvent> {
        db.read()
            .await
            .activity
            .iter()
            .rev()
            .filter(|e| event_type.map_or(true, |t| e.event_type == t))
            .take(limit)
            .cloned()
            .collect()
    }
}
