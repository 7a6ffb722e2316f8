//! `liftlog session` subcommand handlers.

use anyhow::Result;
use sqlx::SqlitePool;

use liftlog_core::{session, setlog};
use liftlog_db::models::SessionState;

use crate::SessionCommands;

/// Dispatch a `SessionCommands` variant to the appropriate handler.
pub async fn run_session_command(
    command: SessionCommands,
    pool: &SqlitePool,
    user_id: i64,
) -> Result<()> {
    match command {
        SessionCommands::Start { plan, notes } => {
            cmd_start(pool, user_id, plan, notes.as_deref()).await
        }
        SessionCommands::Show { session_id } => match session_id {
            Some(id) => cmd_show_one(pool, user_id, id).await,
            None => cmd_show_all(pool, user_id).await,
        },
        SessionCommands::End {
            session_id,
            duration,
            notes,
        } => {
            let ended =
                session::end_session(pool, user_id, session_id, duration, notes.as_deref()).await?;
            println!(
                "Session {session_id} ended after {} minutes.",
                ended.duration_minutes.unwrap_or_default()
            );
            Ok(())
        }
        SessionCommands::AddExercise {
            session_id,
            exercise_id,
            order,
        } => {
            let added =
                setlog::add_exercise_to_session(pool, user_id, session_id, exercise_id, order)
                    .await?;
            println!(
                "Exercise {exercise_id} added to session {session_id} (id {}).",
                added.id
            );
            println!("Log sets with `liftlog set log {} <set-number> ...`", added.id);
            Ok(())
        }
        SessionCommands::Delete { session_id } => {
            session::delete_session(pool, user_id, session_id).await?;
            println!("Session {session_id} and its records deleted.");
            Ok(())
        }
    }
}

async fn cmd_start(
    pool: &SqlitePool,
    user_id: i64,
    plan: Option<i64>,
    notes: Option<&str>,
) -> Result<()> {
    match plan {
        Some(plan_id) => {
            let (started, outcome) =
                session::start_session_from_plan(pool, user_id, plan_id, notes).await?;
            println!("Session {} started from plan {plan_id}.", started.id);
            println!("  Exercises materialized: {}", outcome.materialized);
            if outcome.skipped > 0 {
                println!("  Skipped prescriptions:  {} (see log)", outcome.skipped);
            }
        }
        None => {
            let started = session::start_free_session(pool, user_id, notes).await?;
            println!("Free session {} started.", started.id);
            println!("Add exercises with `liftlog session add-exercise {} <exercise-id>`.", started.id);
        }
    }
    Ok(())
}

/// Show one session with its exercises and per-set progress.
async fn cmd_show_one(pool: &SqlitePool, user_id: i64, session_id: i64) -> Result<()> {
    let detail = session::get_session(pool, user_id, session_id).await?;

    let state = match detail.session.state() {
        SessionState::Active => "active",
        SessionState::Ended => "ended",
    };
    println!("Session {} [{}]", detail.session.id, state);
    println!(
        "  Started:  {}",
        detail.session.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(duration) = detail.session.duration_minutes {
        println!("  Duration: {duration} min");
    }
    if let Some(plan_id) = detail.session.plan_id {
        println!("  Plan:     {plan_id}");
    }
    if let Some(ref notes) = detail.session.notes {
        println!("  Notes:    {notes}");
    }
    println!();

    if detail.exercises.is_empty() {
        println!("No exercises logged.");
        return Ok(());
    }

    for entry in &detail.exercises {
        println!("  [{}] {}", entry.exercise.id, entry.exercise.exercise_name);
        for set in &entry.sets {
            let mark = if set.is_completed { "x" } else { " " };
            let weight = set
                .weight
                .map(|w| format!("{w} kg"))
                .unwrap_or_else(|| "-".into());
            let reps = set
                .reps_completed
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".into());
            println!("      [{mark}] set {}  {weight}  {reps} reps", set.set_number);
        }
    }
    Ok(())
}

/// List the acting user's sessions, newest first.
async fn cmd_show_all(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let sessions = session::list_sessions(pool, user_id, None, None).await?;

    if sessions.is_empty() {
        println!("No sessions found. Use `liftlog session start` to begin one.");
        return Ok(());
    }

    println!(
        "  {:>5}  {:<20}  {:>8}  {:>9}  {:>9}  plan",
        "id", "started", "state", "exercises", "done sets"
    );
    for summary in &sessions {
        let state = if summary.duration_minutes.is_some() {
            "ended"
        } else {
            "active"
        };
        let plan = summary
            .plan_name
            .clone()
            .unwrap_or_else(|| "(free)".into());
        println!(
            "  {:>5}  {:<20}  {:>8}  {:>9}  {:>9}  {}",
            summary.id,
            summary.started_at.format("%Y-%m-%d %H:%M"),
            state,
            summary.exercise_count,
            summary.completed_sets,
            plan
        );
    }
    Ok(())
}
