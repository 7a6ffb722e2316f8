//! Database query functions for the catalog tables: `exercises`,
//! `difficulty_levels`, and `exercise_regions`.
//!
//! Catalog rows are shared reference data. They are read-mostly and never
//! owned by the plan/session tree; deletion is guarded by the integrity
//! coordinator's restrict rules.

use sqlx::SqliteExecutor;

use crate::models::{DifficultyLevel, Exercise, ExerciseRegion};

// -----------------------------------------------------------------------
// Difficulty levels
// -----------------------------------------------------------------------

/// Insert a difficulty level. Names are unique.
pub async fn insert_difficulty_level<'e>(
    ex: impl SqliteExecutor<'e>,
    name: &str,
) -> Result<DifficultyLevel, sqlx::Error> {
    sqlx::query_as::<_, DifficultyLevel>(
        "INSERT INTO difficulty_levels (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(ex)
    .await
}

/// List all difficulty levels, ordered by name.
pub async fn list_difficulty_levels<'e>(
    ex: impl SqliteExecutor<'e>,
) -> Result<Vec<DifficultyLevel>, sqlx::Error> {
    sqlx::query_as::<_, DifficultyLevel>("SELECT * FROM difficulty_levels ORDER BY name")
        .fetch_all(ex)
        .await
}

/// Check whether a difficulty level exists.
pub async fn difficulty_level_exists<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM difficulty_levels WHERE id = $1")
        .bind(id)
        .fetch_one(ex)
        .await?;
    Ok(row.0 > 0)
}

// -----------------------------------------------------------------------
// Exercise regions
// -----------------------------------------------------------------------

/// Insert an exercise region. Names are unique.
pub async fn insert_region<'e>(
    ex: impl SqliteExecutor<'e>,
    name: &str,
) -> Result<ExerciseRegion, sqlx::Error> {
    sqlx::query_as::<_, ExerciseRegion>(
        "INSERT INTO exercise_regions (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(ex)
    .await
}

/// List all exercise regions, ordered by name.
pub async fn list_regions<'e>(
    ex: impl SqliteExecutor<'e>,
) -> Result<Vec<ExerciseRegion>, sqlx::Error> {
    sqlx::query_as::<_, ExerciseRegion>("SELECT * FROM exercise_regions ORDER BY name")
        .fetch_all(ex)
        .await
}

/// Check whether an exercise region exists.
pub async fn region_exists<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercise_regions WHERE id = $1")
        .bind(id)
        .fetch_one(ex)
        .await?;
    Ok(row.0 > 0)
}

// -----------------------------------------------------------------------
// Exercises
// -----------------------------------------------------------------------

/// Insert a new exercise row.
pub async fn insert_exercise<'e>(
    ex: impl SqliteExecutor<'e>,
    name: &str,
    description: Option<&str>,
    video_url: Option<&str>,
    image_url: Option<&str>,
    difficulty_level_id: i64,
    region_id: i64,
) -> Result<Exercise, sqlx::Error> {
    sqlx::query_as::<_, Exercise>(
        "INSERT INTO exercises (name, description, video_url, image_url, difficulty_level_id, region_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(video_url)
    .bind(image_url)
    .bind(difficulty_level_id)
    .bind(region_id)
    .fetch_one(ex)
    .await
}

/// Fetch a single exercise by ID.
pub async fn get_exercise<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<Exercise>, sqlx::Error> {
    sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// Check whether an exercise exists.
pub async fn exercise_exists<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercises WHERE id = $1")
        .bind(id)
        .fetch_one(ex)
        .await?;
    Ok(row.0 > 0)
}

/// List all exercises, ordered by name.
pub async fn list_exercises<'e>(
    ex: impl SqliteExecutor<'e>,
) -> Result<Vec<Exercise>, sqlx::Error> {
    sqlx::query_as::<_, Exercise>("SELECT * FROM exercises ORDER BY name")
        .fetch_all(ex)
        .await
}

/// List the exercises targeting a given region, ordered by name.
pub async fn list_exercises_for_region<'e>(
    ex: impl SqliteExecutor<'e>,
    region_id: i64,
) -> Result<Vec<Exercise>, sqlx::Error> {
    sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE region_id = $1 ORDER BY name")
        .bind(region_id)
        .fetch_all(ex)
        .await
}

/// Update an exercise row in place. Returns the number of rows affected
/// (0 means the exercise does not exist).
#[allow(clippy::too_many_arguments)]
pub async fn update_exercise<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
    name: &str,
    description: Option<&str>,
    video_url: Option<&str>,
    image_url: Option<&str>,
    difficulty_level_id: i64,
    region_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE exercises \
         SET name = $1, description = $2, video_url = $3, image_url = $4, \
             difficulty_level_id = $5, region_id = $6 \
         WHERE id = $7",
    )
    .bind(name)
    .bind(description)
    .bind(video_url)
    .bind(image_url)
    .bind(difficulty_level_id)
    .bind(region_id)
    .bind(id)
    .execute(ex)
    .await?;

    Ok(result.rows_affected())
}
