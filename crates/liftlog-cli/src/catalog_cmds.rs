//! `liftlog catalog` subcommand handlers.
//!
//! The catalog (levels, regions, exercises) is shared across users, so
//! none of these commands take an acting user.

use anyhow::Result;
use sqlx::SqlitePool;

use liftlog_core::catalog;

use crate::CatalogCommands;

/// Dispatch a `CatalogCommands` variant to the appropriate handler.
pub async fn run_catalog_command(command: CatalogCommands, pool: &SqlitePool) -> Result<()> {
    match command {
        CatalogCommands::AddLevel { name } => {
            let level = catalog::create_difficulty_level(pool, &name).await?;
            println!("Difficulty level created: {} (id {})", level.name, level.id);
            Ok(())
        }
        CatalogCommands::Levels => cmd_list_levels(pool).await,
        CatalogCommands::AddRegion { name } => {
            let region = catalog::create_region(pool, &name).await?;
            println!("Region created: {} (id {})", region.name, region.id);
            Ok(())
        }
        CatalogCommands::Regions => cmd_list_regions(pool).await,
        CatalogCommands::AddExercise {
            name,
            level,
            region,
            description,
            video_url,
            image_url,
        } => {
            let exercise = catalog::create_exercise(
                pool,
                &name,
                description.as_deref(),
                video_url.as_deref(),
                image_url.as_deref(),
                level,
                region,
            )
            .await?;
            println!("Exercise created: {} (id {})", exercise.name, exercise.id);
            Ok(())
        }
        CatalogCommands::Exercises { region } => cmd_list_exercises(pool, region).await,
        CatalogCommands::DeleteExercise { exercise_id } => {
            catalog::delete_exercise(pool, exercise_id).await?;
            println!("Exercise {exercise_id} deleted.");
            Ok(())
        }
    }
}

async fn cmd_list_levels(pool: &SqlitePool) -> Result<()> {
    let levels = catalog::list_difficulty_levels(pool).await?;
    if levels.is_empty() {
        println!("No difficulty levels. Use `liftlog catalog add-level <name>`.");
        return Ok(());
    }
    for level in &levels {
        println!("  {:>4}  {}", level.id, level.name);
    }
    Ok(())
}

async fn cmd_list_regions(pool: &SqlitePool) -> Result<()> {
    let regions = catalog::list_regions(pool).await?;
    if regions.is_empty() {
        println!("No regions. Use `liftlog catalog add-region <name>`.");
        return Ok(());
    }
    for region in &regions {
        println!("  {:>4}  {}", region.id, region.name);
    }
    Ok(())
}

async fn cmd_list_exercises(pool: &SqlitePool, region: Option<i64>) -> Result<()> {
    let exercises = catalog::list_exercises(pool, region).await?;
    if exercises.is_empty() {
        println!("No exercises found.");
        return Ok(());
    }
    for exercise in &exercises {
        print!("  {:>4}  {}", exercise.id, exercise.name);
        if let Some(ref description) = exercise.description {
            print!("  -  {description}");
        }
        println!();
    }
    Ok(())
}
