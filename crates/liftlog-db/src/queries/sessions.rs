//! Database query functions for the `workout_sessions` and
//! `session_exercises` tables.

use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

use crate::models::{SessionExercise, WorkoutSession};

/// Insert a new session row with a server-assigned start timestamp.
pub async fn insert_session<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
    plan_id: Option<i64>,
    notes: Option<&str>,
) -> Result<WorkoutSession, sqlx::Error> {
    sqlx::query_as::<_, WorkoutSession>(
        "INSERT INTO workout_sessions (user_id, plan_id, started_at, notes) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(user_id)
    .bind(plan_id)
    .bind(Utc::now())
    .bind(notes)
    .fetch_one(ex)
    .await
}

/// Fetch a session by ID, scoped to its owner.
pub async fn get_session<'e>(
    ex: impl SqliteExecutor<'e>,
    session_id: i64,
    user_id: i64,
) -> Result<Option<WorkoutSession>, sqlx::Error> {
    sqlx::query_as::<_, WorkoutSession>(
        "SELECT * FROM workout_sessions WHERE id = $1 AND user_id = $2",
    )
    .bind(session_id)
    .bind(user_id)
    .fetch_optional(ex)
    .await
}

/// A session with its plan name and progress counts (for list views).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionSummary {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: Option<i64>,
    pub plan_name: Option<String>,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
    pub exercise_count: i64,
    pub completed_sets: i64,
}

/// List a user's sessions, newest first, optionally filtered by start
/// timestamp. `from` and `to` are inclusive bounds; a `None` bound is open.
pub async fn list_sessions<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<Vec<SessionSummary>, sqlx::Error> {
    sqlx::query_as::<_, SessionSummary>(
        "SELECT s.id, s.user_id, s.plan_id, p.name AS plan_name, \
                s.started_at, s.duration_minutes, s.notes, \
                (SELECT COUNT(*) FROM session_exercises se \
                 WHERE se.session_id = s.id) AS exercise_count, \
                (SELECT COUNT(*) FROM set_logs sl \
                 JOIN session_exercises se ON se.id = sl.session_exercise_id \
                 WHERE se.session_id = s.id AND sl.is_completed) AS completed_sets \
         FROM workout_sessions s \
         LEFT JOIN workout_plans p ON p.id = s.plan_id \
         WHERE s.user_id = $1 \
           AND ($2 IS NULL OR s.started_at >= $2) \
           AND ($3 IS NULL OR s.started_at <= $3) \
         ORDER BY s.started_at DESC, s.id DESC",
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(ex)
    .await
}

/// End a session: set its duration and optionally replace its notes.
///
/// The WHERE clause includes `duration_minutes IS NULL` as an optimistic
/// guard, so the one-way Active -> Ended transition can only happen once.
/// Returns the updated row, or `None` when the session is absent, not
/// owned, or already ended (the caller disambiguates).
pub async fn end_session<'e>(
    ex: impl SqliteExecutor<'e>,
    session_id: i64,
    user_id: i64,
    duration_minutes: i64,
    notes: Option<&str>,
) -> Result<Option<WorkoutSession>, sqlx::Error> {
    sqlx::query_as::<_, WorkoutSession>(
        "UPDATE workout_sessions \
         SET duration_minutes = $1, notes = COALESCE($2, notes) \
         WHERE id = $3 AND user_id = $4 AND duration_minutes IS NULL \
         RETURNING *",
    )
    .bind(duration_minutes)
    .bind(notes)
    .bind(session_id)
    .bind(user_id)
    .fetch_optional(ex)
    .await
}

// -----------------------------------------------------------------------
// Session exercises
// -----------------------------------------------------------------------

/// Insert a new session-exercise row. `plan_exercise_id` records
/// provenance for materialized rows and is `None` for ad-hoc additions.
pub async fn insert_session_exercise<'e>(
    ex: impl SqliteExecutor<'e>,
    session_id: i64,
    exercise_id: i64,
    plan_exercise_id: Option<i64>,
    order_in_session: Option<i64>,
) -> Result<SessionExercise, sqlx::Error> {
    sqlx::query_as::<_, SessionExercise>(
        "INSERT INTO session_exercises (session_id, exercise_id, plan_exercise_id, order_in_session) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(session_id)
    .bind(exercise_id)
    .bind(plan_exercise_id)
    .bind(order_in_session)
    .fetch_one(ex)
    .await
}

/// Fetch a session-exercise by ID, scoped through its session to the owner.
pub async fn get_session_exercise<'e>(
    ex: impl SqliteExecutor<'e>,
    session_exercise_id: i64,
    user_id: i64,
) -> Result<Option<SessionExercise>, sqlx::Error> {
    sqlx::query_as::<_, SessionExercise>(
        "SELECT se.* FROM session_exercises se \
         JOIN workout_sessions s ON s.id = se.session_id \
         WHERE se.id = $1 AND s.user_id = $2",
    )
    .bind(session_exercise_id)
    .bind(user_id)
    .fetch_optional(ex)
    .await
}

/// List a session's exercises in execution order (`order_in_session`
/// ascending, NULLs last, tie-broken by insertion id).
pub async fn list_session_exercises<'e>(
    ex: impl SqliteExecutor<'e>,
    session_id: i64,
) -> Result<Vec<SessionExercise>, sqlx::Error> {
    sqlx::query_as::<_, SessionExercise>(
        "SELECT * FROM session_exercises \
         WHERE session_id = $1 \
         ORDER BY order_in_session IS NULL, order_in_session, id",
    )
    .bind(session_id)
    .fetch_all(ex)
    .await
}

/// A session-exercise joined with its exercise name (for detail views).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionExerciseDetail {
    pub id: i64,
    pub session_id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub plan_exercise_id: Option<i64>,
    pub order_in_session: Option<i64>,
}

/// List a session's exercises with names, in execution order.
pub async fn list_session_exercise_details<'e>(
    ex: impl SqliteExecutor<'e>,
    session_id: i64,
) -> Result<Vec<SessionExerciseDetail>, sqlx::Error> {
    sqlx::query_as::<_, SessionExerciseDetail>(
        "SELECT se.id, se.session_id, se.exercise_id, e.name AS exercise_name, \
                se.plan_exercise_id, se.order_in_session \
         FROM session_exercises se \
         JOIN exercises e ON e.id = se.exercise_id \
         WHERE se.session_id = $1 \
         ORDER BY se.order_in_session IS NULL, se.order_in_session, se.id",
    )
    .bind(session_id)
    .fetch_all(ex)
    .await
}

/// Next order slot in a session: `max(existing order) + 1`, starting at 1.
pub async fn next_order_in_session<'e>(
    ex: impl SqliteExecutor<'e>,
    session_id: i64,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COALESCE(MAX(order_in_session), 0) + 1 \
         FROM session_exercises WHERE session_id = $1",
    )
    .bind(session_id)
    .fetch_one(ex)
    .await?;
    Ok(row.0)
}
