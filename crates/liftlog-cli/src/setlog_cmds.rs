//! `liftlog set` subcommand handlers.

use anyhow::Result;
use sqlx::SqlitePool;

use liftlog_core::setlog;

use crate::SetCommands;

/// Dispatch a `SetCommands` variant to the appropriate handler.
pub async fn run_set_command(command: SetCommands, pool: &SqlitePool, user_id: i64) -> Result<()> {
    match command {
        SetCommands::Log {
            session_exercise_id,
            set_number,
            weight,
            reps,
            done,
        } => {
            let logged = setlog::log_set(
                pool,
                user_id,
                session_exercise_id,
                set_number,
                weight,
                reps,
                done,
            )
            .await?;
            let status = if logged.is_completed { "completed" } else { "recorded" };
            println!("Set {} {status} (id {}).", logged.set_number, logged.id);
            Ok(())
        }
        SetCommands::List {
            session_exercise_id,
        } => cmd_list(pool, user_id, session_exercise_id).await,
        SetCommands::Delete { set_log_id } => {
            setlog::delete_set_log(pool, user_id, set_log_id).await?;
            println!("Set log {set_log_id} deleted.");
            Ok(())
        }
    }
}

async fn cmd_list(pool: &SqlitePool, user_id: i64, session_exercise_id: i64) -> Result<()> {
    let sets = setlog::list_set_logs(pool, user_id, session_exercise_id).await?;

    if sets.is_empty() {
        println!("No sets logged for session exercise {session_exercise_id}.");
        return Ok(());
    }

    println!("  {:>5}  {:>4}  {:>8}  {:>5}  done", "id", "set", "weight", "reps");
    for set in &sets {
        let weight = set
            .weight
            .map(|w| format!("{w}"))
            .unwrap_or_else(|| "-".into());
        let reps = set
            .reps_completed
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".into());
        let done = if set.is_completed { "yes" } else { "no" };
        println!(
            "  {:>5}  {:>4}  {:>8}  {:>5}  {}",
            set.id, set.set_number, weight, reps, done
        );
    }
    Ok(())
}
