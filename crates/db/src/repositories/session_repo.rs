//! Repository for refresh-token sessions.

use officehub_core::types::{DbId, Timestamp};

use crate::models::session::{CreateSession, Session};
use crate::Database;

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(db: &Database, input: &CreateSession, now: Timestamp) -> Session {
        db.write()
            .await
            .sessions
            .insert_with(|id| Session {
                id,
                user_id: input.user_id,
                refresh_token_hash: input.refresh_token_hash.clone(),
                expires_at: input.expires_at,
                revoked_at: None,
                created_at: now,
            })
            .clone()
    }

    /// Find an unrevoked, unexpired session by its refresh token hash.
    pub async fn find_by_refresh_token_hash(
        db: &Database,
        hash: &str,
        now: Timestamp,
    ) -> Option<Session> {
        db.read()
            .await
            .sessions
            .iter()
            .find(|s| s.refresh_token_hash == hash && s.is_usable(now))
            .cloned()
    }

    /// Revoke one session. Returns `false` if it was unknown or already revoked.
    pub async fn revoke(db: &Database, session_id: DbId, now: Timestamp) -> bool {
        let mut tables = db.write().await;
        match tables.sessions.get_mut(session_id) {
            Some(s) if s.revoked_at.is_none() => {
                s.revoked_at = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Revoke every open session of a user, returning how many were revoked.
    pub async fn revoke_all_for_user(db: &Database, user_id: DbId, now: Timestamp) -> usize {
        let mut tables = db.write().await;
        let mut count = 0;
        for s in tables
            .sessions
            .iter_mut()
            .filter(|s| s.user_id == user_id && s.revoked_at.is_none())
        {
            s.revoked_at = Some(now);
            count += 1;
        }
        count
    }
}
