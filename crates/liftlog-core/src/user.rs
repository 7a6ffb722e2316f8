//! User operations.
//!
//! Authentication itself (password verification, token issuance) is an
//! external collaborator; this module only maintains the user rows the
//! rest of the hierarchy hangs off.

use sqlx::SqlitePool;
use tracing::info;

use liftlog_db::models::User;
use liftlog_db::queries::users as user_queries;

use crate::error::{Error, Result};
use crate::integrity::{self, Entity};

/// Create a user. Duplicate usernames or emails surface as
/// [`Error::Conflict`] via the store's unique constraints.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User> {
    if username.trim().is_empty() {
        return Err(Error::InvalidArgument("username must not be empty".into()));
    }
    if email.trim().is_empty() {
        return Err(Error::InvalidArgument("email must not be empty".into()));
    }

    let user = user_queries::insert_user(pool, username, email, password_hash).await?;
    info!(user_id = user.id, username, "user created");
    Ok(user)
}

/// Fetch a user by id.
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<User> {
    user_queries::get_user(pool, user_id)
        .await?
        .ok_or_else(|| Error::not_found("user", user_id))
}

/// Delete a user and everything they own: plans (with their template
/// rows), sessions (with their full subtree), calorie calculations,
/// achievements, and settings, all in one transaction.
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !user_queries::user_exists(&mut *tx, user_id).await? {
        return Err(Error::not_found("user", user_id));
    }

    integrity::delete_entity(&mut *tx, Entity::User, user_id).await?;

    tx.commit().await.map_err(Error::Store)?;
    info!(user_id, "user deleted");
    Ok(())
}
