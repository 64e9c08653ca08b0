//! Repository for the `notifications` table.

use officehub_core::notification::NotificationDraft;
use officehub_core::types::{DbId, Timestamp};

use crate::models::notification::Notification;
use crate::{Database, Tables};

/// Provides append and read-state operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Append a notification inside an existing unit of work.
    pub(crate) fn push(
        tables: &mut Tables,
        user_id: DbId,
        draft: NotificationDraft,
        now: Timestamp,
    ) -> Notification {
        tables
            .notifications
            .insert_with(|id| Notification {
                id,
                user_id,
                kind: draft.kind,
                title: draft.title,
                message: draft.message,
                is_read: false,
                read_at: None,
                created_at: now,
            })
            .clone()
    }

    /// Append a notification for a user as its own unit of work.
    ///
    /// Booking and attendance operations write their notifications through
    /// `push` under the same lock as the change they report; this is the
    /// standalone entry point for notifications with no accompanying write.
    pub async fn create(
        db: &Database,
        user_id: DbId,
        draft: NotificationDraft,
        now: Timestamp,
    ) -> Notification {
        let mut tables = db.write().await;
        Self::push(&mut tables, user_id, draft, now)
    }

    /// List notifications for a user, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_user(
        db: &Database,
        user_id: DbId,
        unread_only: bool,
        limit: usize,
        offset: usize,
    ) -> Vec<Notification> {
        let tables = db.read().await;
        tables
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Mark a single notification as read.
    ///
    /// Returns `false` only when the notification does not exist or belongs
    /// to another user. Marking an already-read notification is a no-op that
    /// still returns `true`, and keeps the original `read_at`.
    pub async fn mark_read(
        db: &Database,
        notification_id: DbId,
        user_id: DbId,
        now: Timestamp,
    ) -> bool {
        let mut tables = db.write().await;
        match tables.notifications.get_mut(notification_id) {
            Some(n) if n.user_id == user_id => {
                if !n.is_read {
                    n.is_read = true;
                    n.read_at = Some(now);
                }
                true
            }
            _ => false,
        }
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were newly marked read.
    pub async fn mark_all_read(db: &Database, user_id: DbId, now: Timestamp) -> usize {
        let mut tables = db.write().await;
        let mut count = 0;
        for n in tables
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            n.read_at = Some(now);
            count += 1;
        }
        count
    }

    /// Get the number of unread notifications for a user.
    pub async fn unread_count(db: &Database, user_id: DbId) -> usize {
        let tables = db.read().await;
        tables
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count()
    }
}
