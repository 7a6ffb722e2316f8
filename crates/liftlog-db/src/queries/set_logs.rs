//! Database query functions for the `set_logs` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

use crate::models::SetLog;

/// Upsert a set log keyed on `(session_exercise_id, set_number)`.
///
/// A single statement through the composite UNIQUE constraint, so
/// concurrent calls for the same set serialize on the store's write path
/// and can never produce two rows: the last writer wins.
///
/// `completed_at` is derived by the caller from `is_completed` and is
/// written unconditionally -- a `false` submission clears any previous
/// timestamp.
pub async fn upsert_set_log<'e>(
    ex: impl SqliteExecutor<'e>,
    session_exercise_id: i64,
    set_number: i64,
    weight: Option<f64>,
    reps_completed: Option<i64>,
    is_completed: bool,
    completed_at: Option<DateTime<Utc>>,
) -> Result<SetLog, sqlx::Error> {
    sqlx::query_as::<_, SetLog>(
        "INSERT INTO set_logs (session_exercise_id, set_number, weight, reps_completed, is_completed, completed_at) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (session_exercise_id, set_number) DO UPDATE SET \
             weight = excluded.weight, \
             reps_completed = excluded.reps_completed, \
             is_completed = excluded.is_completed, \
             completed_at = excluded.completed_at \
         RETURNING *",
    )
    .bind(session_exercise_id)
    .bind(set_number)
    .bind(weight)
    .bind(reps_completed)
    .bind(is_completed)
    .bind(completed_at)
    .fetch_one(ex)
    .await
}

/// Insert an empty placeholder set log (used by materialization).
pub async fn insert_placeholder<'e>(
    ex: impl SqliteExecutor<'e>,
    session_exercise_id: i64,
    set_number: i64,
) -> Result<SetLog, sqlx::Error> {
    sqlx::query_as::<_, SetLog>(
        "INSERT INTO set_logs (session_exercise_id, set_number, is_completed) \
         VALUES ($1, $2, 0) \
         RETURNING *",
    )
    .bind(session_exercise_id)
    .bind(set_number)
    .fetch_one(ex)
    .await
}

/// Fetch a set log by ID, scoped through its session to the owner.
pub async fn get_set_log<'e>(
    ex: impl SqliteExecutor<'e>,
    set_log_id: i64,
    user_id: i64,
) -> Result<Option<SetLog>, sqlx::Error> {
    sqlx::query_as::<_, SetLog>(
        "SELECT sl.* FROM set_logs sl \
         JOIN session_exercises se ON se.id = sl.session_exercise_id \
         JOIN workout_sessions s ON s.id = se.session_id \
         WHERE sl.id = $1 AND s.user_id = $2",
    )
    .bind(set_log_id)
    .bind(user_id)
    .fetch_optional(ex)
    .await
}

/// List the set logs of a session-exercise, ordered by set number.
pub async fn list_set_logs<'e>(
    ex: impl SqliteExecutor<'e>,
    session_exercise_id: i64,
) -> Result<Vec<SetLog>, sqlx::Error> {
    sqlx::query_as::<_, SetLog>(
        "SELECT * FROM set_logs WHERE session_exercise_id = $1 ORDER BY set_number",
    )
    .bind(session_exercise_id)
    .fetch_all(ex)
    .await
}

/// Delete a set log. Returns the number of rows affected.
pub async fn delete_set_log<'e>(
    ex: impl SqliteExecutor<'e>,
    set_log_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM set_logs WHERE id = $1")
        .bind(set_log_id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected())
}
