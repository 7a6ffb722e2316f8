//! Plan model operations.
//!
//! A plan is a user-owned template of ordered exercise prescriptions.
//! Multi-step mutations run their read-check-write sequence inside a
//! single transaction so a concurrent catalog delete either hits the
//! restrict rule or fails the dependent insert atomically.

use sqlx::SqlitePool;
use tracing::info;

use liftlog_db::models::{PlanExercise, WorkoutPlan};
use liftlog_db::queries::catalog as catalog_queries;
use liftlog_db::queries::plans::{self as plan_queries, PlanExerciseDetail, PlanSummary};
use liftlog_db::queries::users as user_queries;

use crate::error::{Error, Result};
use crate::integrity::{self, Entity};

/// A plan with its full prescription list, ordered by `order_in_plan`
/// (NULLs last, tie-broken by insertion id).
#[derive(Debug, Clone)]
pub struct PlanDetail {
    pub plan: WorkoutPlan,
    pub exercises: Vec<PlanExerciseDetail>,
}

/// Create an empty plan for a user.
pub async fn create_plan(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<WorkoutPlan> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("plan name must not be empty".into()));
    }

    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !user_queries::user_exists(&mut *tx, user_id).await? {
        return Err(Error::not_found("user", user_id));
    }

    let plan = plan_queries::insert_plan(&mut *tx, user_id, name, description).await?;

    tx.commit().await.map_err(Error::Store)?;
    info!(plan_id = plan.id, user_id, "plan created");
    Ok(plan)
}

/// Fetch a plan with its prescriptions.
pub async fn get_plan(pool: &SqlitePool, user_id: i64, plan_id: i64) -> Result<PlanDetail> {
    let plan = plan_queries::get_plan(pool, plan_id, user_id)
        .await?
        .ok_or_else(|| Error::not_found("workout plan", plan_id))?;

    let exercises = plan_queries::list_plan_exercise_details(pool, plan_id).await?;

    Ok(PlanDetail { plan, exercises })
}

/// List a user's plans with exercise counts, newest first.
pub async fn list_plans(pool: &SqlitePool, user_id: i64) -> Result<Vec<PlanSummary>> {
    Ok(plan_queries::list_plans(pool, user_id).await?)
}

/// Rename a plan / replace its description.
pub async fn update_plan(
    pool: &SqlitePool,
    user_id: i64,
    plan_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("plan name must not be empty".into()));
    }

    let rows = plan_queries::update_plan(pool, plan_id, user_id, name, description).await?;
    if rows == 0 {
        return Err(Error::not_found("workout plan", plan_id));
    }
    Ok(())
}

/// Attach an exercise prescription to a plan.
///
/// Policy: an exercise may appear at most once per plan; a duplicate is
/// rejected with [`Error::Conflict`]. When `order` is omitted, the new
/// row goes after the current maximum (`max(existing) + 1`, starting at
/// 1); gaps left by earlier edits are not reused.
#[allow(clippy::too_many_arguments)]
pub async fn add_exercise(
    pool: &SqlitePool,
    user_id: i64,
    plan_id: i64,
    exercise_id: i64,
    sets: i64,
    reps: i64,
    rest_seconds: Option<i64>,
    order: Option<i64>,
) -> Result<PlanExercise> {
    validate_prescription(sets, reps)?;

    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if plan_queries::get_plan(&mut *tx, plan_id, user_id).await?.is_none() {
        return Err(Error::not_found("workout plan", plan_id));
    }
    if !catalog_queries::exercise_exists(&mut *tx, exercise_id).await? {
        return Err(Error::invalid_ref("exercise", exercise_id));
    }
    if plan_queries::plan_has_exercise(&mut *tx, plan_id, exercise_id).await? {
        return Err(Error::Conflict(format!(
            "exercise {exercise_id} is already in plan {plan_id}"
        )));
    }

    let order = match order {
        Some(o) => o,
        None => plan_queries::next_order_in_plan(&mut *tx, plan_id).await?,
    };

    let plan_exercise = plan_queries::insert_plan_exercise(
        &mut *tx,
        plan_id,
        exercise_id,
        sets,
        reps,
        rest_seconds,
        Some(order),
    )
    .await?;

    tx.commit().await.map_err(Error::Store)?;
    Ok(plan_exercise)
}

/// Update a prescription in place.
///
/// The (plan, plan-exercise, owner) triple must match, otherwise the row
/// is treated as absent. Swapping the exercise itself is allowed as long
/// as the new exercise id is valid.
#[allow(clippy::too_many_arguments)]
pub async fn update_exercise(
    pool: &SqlitePool,
    user_id: i64,
    plan_id: i64,
    plan_exercise_id: i64,
    exercise_id: i64,
    sets: i64,
    reps: i64,
    rest_seconds: Option<i64>,
    order: Option<i64>,
) -> Result<()> {
    validate_prescription(sets, reps)?;

    let mut tx = pool.begin().await.map_err(Error::Store)?;

    let existing = plan_queries::get_plan_exercise(&mut *tx, plan_exercise_id, plan_id, user_id)
        .await?
        .ok_or_else(|| Error::not_found("plan exercise", plan_exercise_id))?;

    if existing.exercise_id != exercise_id
        && !catalog_queries::exercise_exists(&mut *tx, exercise_id).await?
    {
        return Err(Error::invalid_ref("exercise", exercise_id));
    }

    plan_queries::update_plan_exercise(
        &mut *tx,
        plan_exercise_id,
        exercise_id,
        sets,
        reps,
        rest_seconds,
        order,
    )
    .await?;

    tx.commit().await.map_err(Error::Store)?;
    Ok(())
}

/// Remove a prescription from a plan.
///
/// Session exercises that were materialized from it keep their execution
/// record; only their provenance pointer is cleared.
pub async fn remove_exercise(
    pool: &SqlitePool,
    user_id: i64,
    plan_id: i64,
    plan_exercise_id: i64,
) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if plan_queries::get_plan_exercise(&mut *tx, plan_exercise_id, plan_id, user_id)
        .await?
        .is_none()
    {
        return Err(Error::not_found("plan exercise", plan_exercise_id));
    }

    integrity::delete_entity(&mut *tx, Entity::PlanExercise, plan_exercise_id).await?;

    tx.commit().await.map_err(Error::Store)?;
    Ok(())
}

/// Delete a plan and its prescriptions.
///
/// Sessions that were started from the plan survive with `plan_id`
/// cleared -- the historical record is preserved.
pub async fn delete_plan(pool: &SqlitePool, user_id: i64, plan_id: i64) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if plan_queries::get_plan(&mut *tx, plan_id, user_id).await?.is_none() {
        return Err(Error::not_found("workout plan", plan_id));
    }

    integrity::delete_entity(&mut *tx, Entity::WorkoutPlan, plan_id).await?;

    tx.commit().await.map_err(Error::Store)?;
    info!(plan_id, user_id, "plan deleted");
    Ok(())
}

fn validate_prescription(sets: i64, reps: i64) -> Result<()> {
    if sets < 1 {
        return Err(Error::InvalidArgument(format!("sets must be >= 1, got {sets}")));
    }
    if reps < 1 {
        return Err(Error::InvalidArgument(format!("reps must be >= 1, got {reps}")));
    }
    Ok(())
}
