//! Set-log engine: recording actual performance per set.
//!
//! Works identically for sets that were pre-materialized from a plan and
//! sets added ad hoc -- the upsert keys on `(session_exercise_id,
//! set_number)` either way.

use chrono::Utc;
use sqlx::SqlitePool;

use liftlog_db::models::{SessionExercise, SetLog};
use liftlog_db::queries::catalog as catalog_queries;
use liftlog_db::queries::sessions::{self as session_queries, SessionExerciseDetail};
use liftlog_db::queries::set_logs as set_log_queries;

use crate::error::{Error, Result};

/// Append an exercise to a session ad hoc.
///
/// The row carries no plan back-reference. When `order` is omitted the
/// exercise goes after the current maximum order in the session.
pub async fn add_exercise_to_session(
    pool: &SqlitePool,
    user_id: i64,
    session_id: i64,
    exercise_id: i64,
    order: Option<i64>,
) -> Result<SessionExercise> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if session_queries::get_session(&mut *tx, session_id, user_id).await?.is_none() {
        return Err(Error::not_found("workout session", session_id));
    }
    if !catalog_queries::exercise_exists(&mut *tx, exercise_id).await? {
        return Err(Error::invalid_ref("exercise", exercise_id));
    }

    let order = match order {
        Some(o) => o,
        None => session_queries::next_order_in_session(&mut *tx, session_id).await?,
    };

    let session_exercise = session_queries::insert_session_exercise(
        &mut *tx,
        session_id,
        exercise_id,
        None,
        Some(order),
    )
    .await?;

    tx.commit().await.map_err(Error::Store)?;
    Ok(session_exercise)
}

/// Fetch a session-exercise, scoped to the acting user.
pub async fn get_session_exercise(
    pool: &SqlitePool,
    user_id: i64,
    session_exercise_id: i64,
) -> Result<SessionExercise> {
    session_queries::get_session_exercise(pool, session_exercise_id, user_id)
        .await?
        .ok_or_else(|| Error::not_found("session exercise", session_exercise_id))
}

/// List a session's exercises with names, in execution order.
pub async fn list_session_exercises(
    pool: &SqlitePool,
    user_id: i64,
    session_id: i64,
) -> Result<Vec<SessionExerciseDetail>> {
    if session_queries::get_session(pool, session_id, user_id).await?.is_none() {
        return Err(Error::not_found("workout session", session_id));
    }
    Ok(session_queries::list_session_exercise_details(pool, session_id).await?)
}

/// Record (or re-record) the outcome of one set.
///
/// Upsert semantics: if a set log exists for `(session_exercise_id,
/// set_number)` its fields are replaced in place, otherwise a row is
/// created -- re-submitting identical values leaves one row with the
/// latest values either way.
///
/// The completion timestamp is derived from the submitted flag, not from
/// the delta against the prior state: every `is_completed = true` call
/// stamps the current time (so a repeated true submission re-stamps), and
/// every `false` call clears it.
pub async fn log_set(
    pool: &SqlitePool,
    user_id: i64,
    session_exercise_id: i64,
    set_number: i64,
    weight: Option<f64>,
    reps_completed: Option<i64>,
    is_completed: bool,
) -> Result<SetLog> {
    if set_number < 1 {
        return Err(Error::InvalidArgument(format!(
            "set number must be >= 1, got {set_number}"
        )));
    }

    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if session_queries::get_session_exercise(&mut *tx, session_exercise_id, user_id)
        .await?
        .is_none()
    {
        return Err(Error::not_found("session exercise", session_exercise_id));
    }

    let completed_at = if is_completed { Some(Utc::now()) } else { None };

    let set_log = set_log_queries::upsert_set_log(
        &mut *tx,
        session_exercise_id,
        set_number,
        weight,
        reps_completed,
        is_completed,
        completed_at,
    )
    .await?;

    tx.commit().await.map_err(Error::Store)?;
    Ok(set_log)
}

/// Fetch a single set log, scoped to the acting user.
pub async fn get_set_log(pool: &SqlitePool, user_id: i64, set_log_id: i64) -> Result<SetLog> {
    set_log_queries::get_set_log(pool, set_log_id, user_id)
        .await?
        .ok_or_else(|| Error::not_found("set log", set_log_id))
}

/// List a session-exercise's set logs ordered by set number.
pub async fn list_set_logs(
    pool: &SqlitePool,
    user_id: i64,
    session_exercise_id: i64,
) -> Result<Vec<SetLog>> {
    if session_queries::get_session_exercise(pool, session_exercise_id, user_id)
        .await?
        .is_none()
    {
        return Err(Error::not_found("session exercise", session_exercise_id));
    }
    Ok(set_log_queries::list_set_logs(pool, session_exercise_id).await?)
}

/// Delete a single set log. Nothing depends on one, so this is a plain
/// ownership-checked delete.
pub async fn delete_set_log(pool: &SqlitePool, user_id: i64, set_log_id: i64) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if set_log_queries::get_set_log(&mut *tx, set_log_id, user_id).await?.is_none() {
        return Err(Error::not_found("set log", set_log_id));
    }

    set_log_queries::delete_set_log(&mut *tx, set_log_id).await?;

    tx.commit().await.map_err(Error::Store)?;
    Ok(())
}
