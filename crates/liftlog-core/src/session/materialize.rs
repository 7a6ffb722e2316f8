//! Session materialization: expand a plan snapshot into loggable
//! placeholders at session-start time.
//!
//! For a plan with N prescriptions ordered by `order_in_plan` (NULLs
//! last, tie-broken by insertion id), materialization creates N
//! session-exercise rows preserving order and exercise identity, each
//! back-referencing its originating plan-exercise, plus one empty set
//! log per prescribed set numbered `1..=sets`.
//!
//! Expansion is best-effort: each prescription expands inside its own
//! transaction, so a failing one is skipped whole -- its set numbering is
//! never left partial -- and the rest still materialize. Skips are
//! reported in the outcome and logged, never surfaced as an error.

use sqlx::SqlitePool;
use tracing::{debug, warn};

use liftlog_db::models::PlanExercise;
use liftlog_db::queries::plans as plan_queries;
use liftlog_db::queries::sessions as session_queries;
use liftlog_db::queries::set_logs as set_log_queries;

use crate::error::{Error, Result};

/// What materialization accomplished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeOutcome {
    /// Prescriptions expanded into session exercises with placeholders.
    pub materialized: usize,
    /// Prescriptions that failed to expand and were skipped whole.
    pub skipped: usize,
}

/// Expand every prescription of `plan_id` into `session_id`.
pub async fn materialize_from_plan(
    pool: &SqlitePool,
    session_id: i64,
    plan_id: i64,
) -> Result<MaterializeOutcome> {
    let prescriptions = plan_queries::list_plan_exercises(pool, plan_id).await?;

    let mut outcome = MaterializeOutcome::default();
    for prescription in &prescriptions {
        match expand_one(pool, session_id, prescription).await {
            Ok(()) => outcome.materialized += 1,
            Err(e) => {
                warn!(
                    session_id,
                    plan_exercise_id = prescription.id,
                    exercise_id = prescription.exercise_id,
                    error = %e,
                    "skipping plan exercise during materialization"
                );
                outcome.skipped += 1;
            }
        }
    }

    debug!(
        session_id,
        plan_id,
        materialized = outcome.materialized,
        skipped = outcome.skipped,
        "session materialized"
    );
    Ok(outcome)
}

/// Expand one prescription: the session-exercise row and its `1..=sets`
/// placeholders commit together or not at all.
async fn expand_one(pool: &SqlitePool, session_id: i64, prescription: &PlanExercise) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    let session_exercise = session_queries::insert_session_exercise(
        &mut *tx,
        session_id,
        prescription.exercise_id,
        Some(prescription.id),
        prescription.order_in_plan,
    )
    .await?;

    for set_number in 1..=prescription.sets {
        set_log_queries::insert_placeholder(&mut *tx, session_exercise.id, set_number).await?;
    }

    tx.commit().await.map_err(Error::Store)?;
    Ok(())
}
