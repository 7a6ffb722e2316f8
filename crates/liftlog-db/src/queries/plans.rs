//! Database query functions for the `workout_plans` and `plan_exercises`
//! tables.
//!
//! Every fetch takes the acting user's id and filters on ownership in the
//! WHERE clause, so a row belonging to another user is indistinguishable
//! from an absent row.

use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

use crate::models::{PlanExercise, WorkoutPlan};

/// Insert a new plan row. Returns the inserted plan.
pub async fn insert_plan<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<WorkoutPlan, sqlx::Error> {
    sqlx::query_as::<_, WorkoutPlan>(
        "INSERT INTO workout_plans (user_id, name, description, created_at) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(user_id)
    .bind(name)
    .bind(description)
    .bind(Utc::now())
    .fetch_one(ex)
    .await
}

/// Fetch a plan by ID, scoped to its owner.
pub async fn get_plan<'e>(
    ex: impl SqliteExecutor<'e>,
    plan_id: i64,
    user_id: i64,
) -> Result<Option<WorkoutPlan>, sqlx::Error> {
    sqlx::query_as::<_, WorkoutPlan>(
        "SELECT * FROM workout_plans WHERE id = $1 AND user_id = $2",
    )
    .bind(plan_id)
    .bind(user_id)
    .fetch_optional(ex)
    .await
}

/// A plan with its exercise count (for list views).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanSummary {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub exercise_count: i64,
}

/// List a user's plans, newest first, with exercise counts.
pub async fn list_plans<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
) -> Result<Vec<PlanSummary>, sqlx::Error> {
    sqlx::query_as::<_, PlanSummary>(
        "SELECT p.id, p.user_id, p.name, p.description, p.created_at, \
                (SELECT COUNT(*) FROM plan_exercises pe WHERE pe.plan_id = p.id) AS exercise_count \
         FROM workout_plans p \
         WHERE p.user_id = $1 \
         ORDER BY p.created_at DESC, p.id DESC",
    )
    .bind(user_id)
    .fetch_all(ex)
    .await
}

/// Update a plan's name and description, scoped to its owner. Returns the
/// number of rows affected (0 means not found or not owned).
pub async fn update_plan<'e>(
    ex: impl SqliteExecutor<'e>,
    plan_id: i64,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE workout_plans SET name = $1, description = $2 \
         WHERE id = $3 AND user_id = $4",
    )
    .bind(name)
    .bind(description)
    .bind(plan_id)
    .bind(user_id)
    .execute(ex)
    .await?;

    Ok(result.rows_affected())
}

// -----------------------------------------------------------------------
// Plan exercises
// -----------------------------------------------------------------------

/// Insert a new plan-exercise row.
pub async fn insert_plan_exercise<'e>(
    ex: impl SqliteExecutor<'e>,
    plan_id: i64,
    exercise_id: i64,
    sets: i64,
    reps: i64,
    rest_seconds: Option<i64>,
    order_in_plan: Option<i64>,
) -> Result<PlanExercise, sqlx::Error> {
    sqlx::query_as::<_, PlanExercise>(
        "INSERT INTO plan_exercises (plan_id, exercise_id, sets, reps, rest_seconds, order_in_plan) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING *",
    )
    .bind(plan_id)
    .bind(exercise_id)
    .bind(sets)
    .bind(reps)
    .bind(rest_seconds)
    .bind(order_in_plan)
    .fetch_one(ex)
    .await
}

/// Fetch a plan-exercise by ID, scoped to its plan and the plan's owner.
pub async fn get_plan_exercise<'e>(
    ex: impl SqliteExecutor<'e>,
    plan_exercise_id: i64,
    plan_id: i64,
    user_id: i64,
) -> Result<Option<PlanExercise>, sqlx::Error> {
    sqlx::query_as::<_, PlanExercise>(
        "SELECT pe.* FROM plan_exercises pe \
         JOIN workout_plans p ON p.id = pe.plan_id \
         WHERE pe.id = $1 AND pe.plan_id = $2 AND p.user_id = $3",
    )
    .bind(plan_exercise_id)
    .bind(plan_id)
    .bind(user_id)
    .fetch_optional(ex)
    .await
}

/// List a plan's exercises in prescription order: `order_in_plan`
/// ascending with NULLs last, tie-broken by insertion id.
pub async fn list_plan_exercises<'e>(
    ex: impl SqliteExecutor<'e>,
    plan_id: i64,
) -> Result<Vec<PlanExercise>, sqlx::Error> {
    sqlx::query_as::<_, PlanExercise>(
        "SELECT * FROM plan_exercises \
         WHERE plan_id = $1 \
         ORDER BY order_in_plan IS NULL, order_in_plan, id",
    )
    .bind(plan_id)
    .fetch_all(ex)
    .await
}

/// A plan-exercise joined with its exercise name (for detail views).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanExerciseDetail {
    pub id: i64,
    pub plan_id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub sets: i64,
    pub reps: i64,
    pub rest_seconds: Option<i64>,
    pub order_in_plan: Option<i64>,
}

/// List a plan's exercises with names, in prescription order.
pub async fn list_plan_exercise_details<'e>(
    ex: impl SqliteExecutor<'e>,
    plan_id: i64,
) -> Result<Vec<PlanExerciseDetail>, sqlx::Error> {
    sqlx::query_as::<_, PlanExerciseDetail>(
        "SELECT pe.id, pe.plan_id, pe.exercise_id, e.name AS exercise_name, \
                pe.sets, pe.reps, pe.rest_seconds, pe.order_in_plan \
         FROM plan_exercises pe \
         JOIN exercises e ON e.id = pe.exercise_id \
         WHERE pe.plan_id = $1 \
         ORDER BY pe.order_in_plan IS NULL, pe.order_in_plan, pe.id",
    )
    .bind(plan_id)
    .fetch_all(ex)
    .await
}

/// Whether a plan already contains a given exercise (soft duplicate check).
pub async fn plan_has_exercise<'e>(
    ex: impl SqliteExecutor<'e>,
    plan_id: i64,
    exercise_id: i64,
) -> Result<bool, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM plan_exercises WHERE plan_id = $1 AND exercise_id = $2",
    )
    .bind(plan_id)
    .bind(exercise_id)
    .fetch_one(ex)
    .await?;
    Ok(row.0 > 0)
}

/// Next order slot in a plan: `max(existing order) + 1`, starting at 1.
/// Gaps are not filled.
pub async fn next_order_in_plan<'e>(
    ex: impl SqliteExecutor<'e>,
    plan_id: i64,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COALESCE(MAX(order_in_plan), 0) + 1 FROM plan_exercises WHERE plan_id = $1",
    )
    .bind(plan_id)
    .fetch_one(ex)
    .await?;
    Ok(row.0)
}

/// Update a plan-exercise's prescription in place. Returns the number of
/// rows affected.
#[allow(clippy::too_many_arguments)]
pub async fn update_plan_exercise<'e>(
    ex: impl SqliteExecutor<'e>,
    plan_exercise_id: i64,
    exercise_id: i64,
    sets: i64,
    reps: i64,
    rest_seconds: Option<i64>,
    order_in_plan: Option<i64>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE plan_exercises \
         SET exercise_id = $1, sets = $2, reps = $3, rest_seconds = $4, order_in_plan = $5 \
         WHERE id = $6",
    )
    .bind(exercise_id)
    .bind(sets)
    .bind(reps)
    .bind(rest_seconds)
    .bind(order_in_plan)
    .bind(plan_exercise_id)
    .execute(ex)
    .await?;

    Ok(result.rows_affected())
}
