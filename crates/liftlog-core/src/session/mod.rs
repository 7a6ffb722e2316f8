//! Session model operations and lifecycle.
//!
//! A session is a timestamped execution record, optionally derived from a
//! plan. Its lifecycle is two states: **Active** (created, no duration)
//! and **Ended** (duration set by [`end_session`]). The transition is
//! one-way; deletion is terminal from either state.

pub mod materialize;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use liftlog_db::models::{SetLog, WorkoutSession};
use liftlog_db::queries::plans as plan_queries;
use liftlog_db::queries::sessions::{self as session_queries, SessionExerciseDetail, SessionSummary};
use liftlog_db::queries::set_logs as set_log_queries;

use crate::error::{Error, Result};
use crate::integrity::{self, Entity};
pub use materialize::MaterializeOutcome;

/// A session exercise with its set logs, ordered by set number.
#[derive(Debug, Clone)]
pub struct SessionExerciseWithSets {
    pub exercise: SessionExerciseDetail,
    pub sets: Vec<SetLog>,
}

/// A session with its full exercise/set subtree.
#[derive(Debug, Clone)]
pub struct SessionDetail {
    pub session: WorkoutSession,
    pub exercises: Vec<SessionExerciseWithSets>,
}

/// Start a session derived from a plan.
///
/// The plan must exist and belong to the acting user. The session row is
/// created first (its start timestamp is server-assigned and immutable),
/// then the plan's prescriptions are materialized best-effort; see
/// [`materialize::materialize_from_plan`].
pub async fn start_session_from_plan(
    pool: &SqlitePool,
    user_id: i64,
    plan_id: i64,
    notes: Option<&str>,
) -> Result<(WorkoutSession, MaterializeOutcome)> {
    if plan_queries::get_plan(pool, plan_id, user_id).await?.is_none() {
        return Err(Error::not_found("workout plan", plan_id));
    }

    let session = session_queries::insert_session(pool, user_id, Some(plan_id), notes).await?;
    let outcome = materialize::materialize_from_plan(pool, session.id, plan_id).await?;

    info!(
        session_id = session.id,
        user_id,
        plan_id,
        materialized = outcome.materialized,
        "session started from plan"
    );
    Ok((session, outcome))
}

/// Start a free session with no plan and zero exercises; exercises and
/// sets are added ad hoc afterwards.
pub async fn start_free_session(
    pool: &SqlitePool,
    user_id: i64,
    notes: Option<&str>,
) -> Result<WorkoutSession> {
    let session = session_queries::insert_session(pool, user_id, None, notes).await?;
    info!(session_id = session.id, user_id, "free session started");
    Ok(session)
}

/// Fetch a session with its ordered exercises and set logs.
pub async fn get_session(pool: &SqlitePool, user_id: i64, session_id: i64) -> Result<SessionDetail> {
    let session = session_queries::get_session(pool, session_id, user_id)
        .await?
        .ok_or_else(|| Error::not_found("workout session", session_id))?;

    let exercise_rows = session_queries::list_session_exercise_details(pool, session_id).await?;

    let mut exercises = Vec::with_capacity(exercise_rows.len());
    for exercise in exercise_rows {
        let sets = set_log_queries::list_set_logs(pool, exercise.id).await?;
        exercises.push(SessionExerciseWithSets { exercise, sets });
    }

    Ok(SessionDetail { session, exercises })
}

/// List a user's sessions newest-first, optionally bounded by start
/// timestamp (inclusive).
pub async fn list_sessions(
    pool: &SqlitePool,
    user_id: i64,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<Vec<SessionSummary>> {
    Ok(session_queries::list_sessions(pool, user_id, from, to).await?)
}

/// End a session: the one-way Active -> Ended transition.
///
/// When `duration_minutes` is omitted it is computed as the whole minutes
/// elapsed since the session started. Omitted notes preserve the prior
/// value. Ending an already-ended session is [`Error::Conflict`]; there
/// is no re-open.
pub async fn end_session(
    pool: &SqlitePool,
    user_id: i64,
    session_id: i64,
    duration_minutes: Option<i64>,
    notes: Option<&str>,
) -> Result<WorkoutSession> {
    if let Some(d) = duration_minutes {
        if d < 0 {
            return Err(Error::InvalidArgument(format!(
                "duration must be >= 0 minutes, got {d}"
            )));
        }
    }

    let mut tx = pool.begin().await.map_err(Error::Store)?;

    let existing = session_queries::get_session(&mut *tx, session_id, user_id)
        .await?
        .ok_or_else(|| Error::not_found("workout session", session_id))?;

    let duration = match duration_minutes {
        Some(d) => d,
        None => (Utc::now() - existing.started_at).num_minutes().max(0),
    };

    let ended = session_queries::end_session(&mut *tx, session_id, user_id, duration, notes)
        .await?
        .ok_or_else(|| {
            // The session existed a moment ago, so zero rows means the
            // optimistic guard on duration_minutes failed.
            Error::Conflict(format!("session {session_id} is already ended"))
        })?;

    tx.commit().await.map_err(Error::Store)?;
    info!(session_id, user_id, duration, "session ended");
    Ok(ended)
}

/// Delete a session and its entire exercise/set subtree.
pub async fn delete_session(pool: &SqlitePool, user_id: i64, session_id: i64) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if session_queries::get_session(&mut *tx, session_id, user_id).await?.is_none() {
        return Err(Error::not_found("workout session", session_id));
    }

    integrity::delete_entity(&mut *tx, Entity::WorkoutSession, session_id).await?;

    tx.commit().await.map_err(Error::Store)?;
    info!(session_id, user_id, "session deleted");
    Ok(())
}
