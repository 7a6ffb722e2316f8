//! `liftlog plan` subcommand handlers.
//!
//! Implements:
//! - `liftlog plan create <name>`         -- create an empty plan
//! - `liftlog plan show [plan-id]`        -- show one plan or list all
//! - `liftlog plan add-exercise ...`      -- attach a prescription
//! - `liftlog plan remove-exercise ...`   -- detach a prescription
//! - `liftlog plan delete <plan-id>`      -- delete (history survives)

use anyhow::Result;
use sqlx::SqlitePool;

use liftlog_core::plan;

use crate::PlanCommands;

/// Dispatch a `PlanCommands` variant to the appropriate handler.
pub async fn run_plan_command(
    command: PlanCommands,
    pool: &SqlitePool,
    user_id: i64,
) -> Result<()> {
    match command {
        PlanCommands::Create { name, description } => {
            cmd_create(pool, user_id, &name, description.as_deref()).await
        }
        PlanCommands::Show { plan_id } => match plan_id {
            Some(id) => cmd_show_one(pool, user_id, id).await,
            None => cmd_show_all(pool, user_id).await,
        },
        PlanCommands::Update {
            plan_id,
            name,
            description,
        } => {
            plan::update_plan(pool, user_id, plan_id, &name, description.as_deref()).await?;
            println!("Plan {plan_id} updated.");
            Ok(())
        }
        PlanCommands::AddExercise {
            plan_id,
            exercise_id,
            sets,
            reps,
            rest,
            order,
        } => {
            let added =
                plan::add_exercise(pool, user_id, plan_id, exercise_id, sets, reps, rest, order)
                    .await?;
            println!(
                "Exercise {exercise_id} added to plan {plan_id} at position {} (id {}).",
                added.order_in_plan.unwrap_or_default(),
                added.id
            );
            Ok(())
        }
        PlanCommands::RemoveExercise {
            plan_id,
            plan_exercise_id,
        } => {
            plan::remove_exercise(pool, user_id, plan_id, plan_exercise_id).await?;
            println!("Prescription {plan_exercise_id} removed from plan {plan_id}.");
            Ok(())
        }
        PlanCommands::Delete { plan_id } => {
            plan::delete_plan(pool, user_id, plan_id).await?;
            println!("Plan {plan_id} deleted. Past sessions are preserved.");
            Ok(())
        }
    }
}

async fn cmd_create(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<()> {
    let created = plan::create_plan(pool, user_id, name, description).await?;
    println!("Plan created.");
    println!("  ID:   {}", created.id);
    println!("  Name: {}", created.name);
    println!();
    println!("Next: `liftlog plan add-exercise {} <exercise-id> --sets N --reps N`", created.id);
    Ok(())
}

/// Show one plan with its full prescription list.
async fn cmd_show_one(pool: &SqlitePool, user_id: i64, plan_id: i64) -> Result<()> {
    let detail = plan::get_plan(pool, user_id, plan_id).await?;

    println!("Plan: {} ({})", detail.plan.name, detail.plan.id);
    if let Some(ref description) = detail.plan.description {
        println!("  {description}");
    }
    println!(
        "Created: {}",
        detail.plan.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if detail.exercises.is_empty() {
        println!("No exercises yet.");
        return Ok(());
    }

    println!("  {:>4}  {:>5}  {:<24}  sets x reps  rest", "pos", "id", "exercise");
    for row in &detail.exercises {
        let position = row
            .order_in_plan
            .map(|o| o.to_string())
            .unwrap_or_else(|| "-".into());
        let rest = row
            .rest_seconds
            .map(|r| format!("{r}s"))
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:>4}  {:>5}  {:<24}  {:>4} x {:<4}  {}",
            position, row.id, row.exercise_name, row.sets, row.reps, rest
        );
    }
    Ok(())
}

/// List all of the acting user's plans with summary info.
async fn cmd_show_all(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let plans = plan::list_plans(pool, user_id).await?;

    if plans.is_empty() {
        println!("No plans found. Use `liftlog plan create <name>` to create one.");
        return Ok(());
    }

    println!("  {:>5}  {:<24}  {:>9}  created", "id", "name", "exercises");
    for summary in &plans {
        println!(
            "  {:>5}  {:<24}  {:>9}  {}",
            summary.id,
            summary.name,
            summary.exercise_count,
            summary.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}
