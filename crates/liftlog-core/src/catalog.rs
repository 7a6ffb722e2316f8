//! Catalog store operations: exercises, difficulty levels, body regions.
//!
//! Catalog rows are shared, read-mostly reference data. They are not
//! scoped to a user, and deleting one is restricted while anything in the
//! plan/session hierarchy references it.

use sqlx::SqlitePool;
use tracing::info;

use liftlog_db::models::{DifficultyLevel, Exercise, ExerciseRegion};
use liftlog_db::queries::catalog as catalog_queries;

use crate::error::{Error, Result};
use crate::integrity::{self, Entity};

pub async fn create_difficulty_level(pool: &SqlitePool, name: &str) -> Result<DifficultyLevel> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("level name must not be empty".into()));
    }
    Ok(catalog_queries::insert_difficulty_level(pool, name).await?)
}

pub async fn list_difficulty_levels(pool: &SqlitePool) -> Result<Vec<DifficultyLevel>> {
    Ok(catalog_queries::list_difficulty_levels(pool).await?)
}

pub async fn create_region(pool: &SqlitePool, name: &str) -> Result<ExerciseRegion> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("region name must not be empty".into()));
    }
    Ok(catalog_queries::insert_region(pool, name).await?)
}

pub async fn list_regions(pool: &SqlitePool) -> Result<Vec<ExerciseRegion>> {
    Ok(catalog_queries::list_regions(pool).await?)
}

/// Create a catalog exercise. The referenced difficulty level and region
/// must already exist.
pub async fn create_exercise(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
    video_url: Option<&str>,
    image_url: Option<&str>,
    difficulty_level_id: i64,
    region_id: i64,
) -> Result<Exercise> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("exercise name must not be empty".into()));
    }

    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !catalog_queries::difficulty_level_exists(&mut *tx, difficulty_level_id).await? {
        return Err(Error::invalid_ref("difficulty level", difficulty_level_id));
    }
    if !catalog_queries::region_exists(&mut *tx, region_id).await? {
        return Err(Error::invalid_ref("exercise region", region_id));
    }

    let exercise = catalog_queries::insert_exercise(
        &mut *tx,
        name,
        description,
        video_url,
        image_url,
        difficulty_level_id,
        region_id,
    )
    .await?;

    tx.commit().await.map_err(Error::Store)?;
    info!(exercise_id = exercise.id, name, "exercise created");
    Ok(exercise)
}

pub async fn get_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<Exercise> {
    catalog_queries::get_exercise(pool, exercise_id)
        .await?
        .ok_or_else(|| Error::not_found("exercise", exercise_id))
}

/// List exercises, optionally restricted to one region.
pub async fn list_exercises(pool: &SqlitePool, region_id: Option<i64>) -> Result<Vec<Exercise>> {
    match region_id {
        Some(id) => Ok(catalog_queries::list_exercises_for_region(pool, id).await?),
        None => Ok(catalog_queries::list_exercises(pool).await?),
    }
}

/// Replace an exercise's catalog data in place.
#[allow(clippy::too_many_arguments)]
pub async fn update_exercise(
    pool: &SqlitePool,
    exercise_id: i64,
    name: &str,
    description: Option<&str>,
    video_url: Option<&str>,
    image_url: Option<&str>,
    difficulty_level_id: i64,
    region_id: i64,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("exercise name must not be empty".into()));
    }

    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !catalog_queries::difficulty_level_exists(&mut *tx, difficulty_level_id).await? {
        return Err(Error::invalid_ref("difficulty level", difficulty_level_id));
    }
    if !catalog_queries::region_exists(&mut *tx, region_id).await? {
        return Err(Error::invalid_ref("exercise region", region_id));
    }

    let rows = catalog_queries::update_exercise(
        &mut *tx,
        exercise_id,
        name,
        description,
        video_url,
        image_url,
        difficulty_level_id,
        region_id,
    )
    .await?;

    if rows == 0 {
        return Err(Error::not_found("exercise", exercise_id));
    }

    tx.commit().await.map_err(Error::Store)?;
    Ok(())
}

/// Delete an exercise. Fails with [`Error::IntegrityViolation`] while any
/// plan or session still references it; the exercise and all referencing
/// rows are left unchanged in that case.
pub async fn delete_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !catalog_queries::exercise_exists(&mut *tx, exercise_id).await? {
        return Err(Error::not_found("exercise", exercise_id));
    }

    integrity::delete_entity(&mut *tx, Entity::Exercise, exercise_id).await?;

    tx.commit().await.map_err(Error::Store)?;
    info!(exercise_id, "exercise deleted");
    Ok(())
}

/// Delete a difficulty level. Restricted while any exercise uses it.
pub async fn delete_difficulty_level(pool: &SqlitePool, level_id: i64) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !catalog_queries::difficulty_level_exists(&mut *tx, level_id).await? {
        return Err(Error::not_found("difficulty level", level_id));
    }

    integrity::delete_entity(&mut *tx, Entity::DifficultyLevel, level_id).await?;

    tx.commit().await.map_err(Error::Store)?;
    Ok(())
}

/// Delete a region. Restricted while any exercise uses it.
pub async fn delete_region(pool: &SqlitePool, region_id: i64) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !catalog_queries::region_exists(&mut *tx, region_id).await? {
        return Err(Error::not_found("exercise region", region_id));
    }

    integrity::delete_entity(&mut *tx, Entity::ExerciseRegion, region_id).await?;

    tx.commit().await.map_err(Error::Store)?;
    Ok(())
}
