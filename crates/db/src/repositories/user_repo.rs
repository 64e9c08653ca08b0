//! Repository for the `users` table.

use officehub_core::error::CoreError;
use officehub_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, User};
use crate::Database;

pub struct UserRepo;

impl UserRepo {
    /// Create a user. Emails are unique, compared case-insensitively.
    pub async fn create(db: &Database, input: &CreateUser, now: Timestamp) -> Result<User, CoreError> {
        let email = normalize_email(&input.email);
        let mut tables = db.write().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(CoreError::Conflict(format!(
                "A user with email '{email}' already exists"
            )));
        }
        let user = tables
            .users
            .insert_with(|id| User {
                id,
                name: input.name.trim().to_string(),
                email,
                password_hash: input.password_hash.clone(),
                role: input.role.clone(),
                organization: input.organization.trim().to_string(),
                created_at: now,
            })
            .clone();
        Ok(user)
    }

    pub async fn find_by_id(db: &Database, id: DbId) -> Option<User> {
        db.read().await.users.get(id).cloned()
    }

    pub async fn find_by_email(db: &Database, email: &str) -> Option<User> {
        let email = normalize_email(email);
        db.read()
            .await
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    pub async fn list(db: &Database) -> Vec<User> {
        db.read().await.users.iter().cloned().collect()
    }

    pub async fn update_role(db: &Database, id: DbId, role: &str) -> Result<User, CoreError> {
        let mut tables = db.write().await;
        let user = tables
            .users
            .get_mut(id)
            .ok_or(CoreError::NotFound { entity: "User", id })?;
        user.role = role.to_string();
        Ok(user.clone())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
