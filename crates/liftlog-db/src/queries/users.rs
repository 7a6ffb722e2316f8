//! Database query functions for the `users` table.

use chrono::Utc;
use sqlx::SqliteExecutor;

use crate::models::User;

/// Insert a new user row. Returns the inserted user.
pub async fn insert_user<'e>(
    ex: impl SqliteExecutor<'e>,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(ex)
    .await
}

/// Fetch a single user by ID.
pub async fn get_user<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// Check whether a user exists.
pub async fn user_exists<'e>(ex: impl SqliteExecutor<'e>, id: i64) -> Result<bool, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(ex)
        .await?;
    Ok(row.0 > 0)
}
