//! Profile satellite operations: saved calorie calculations, earned
//! achievements, and per-user settings.
//!
//! These rows hang directly off the user with no hierarchy below them,
//! so everything here is a plain ownership-scoped write or read. The
//! calculation math itself happens client-side; we only store results.

use sqlx::SqlitePool;
use tracing::info;

use liftlog_db::models::{Achievement, CalorieCalculation, UserSetting};
use liftlog_db::queries::profile as profile_queries;
use liftlog_db::queries::users as user_queries;

use crate::error::{Error, Result};

/// Save a calorie calculation result for a user.
pub async fn save_calorie_calculation(
    pool: &SqlitePool,
    user_id: i64,
    age: i64,
    height_cm: f64,
    weight_kg: f64,
    gender: &str,
    activity_level: &str,
    goal: &str,
    tdee: f64,
    adjusted_calories: f64,
) -> Result<CalorieCalculation> {
    if age < 1 {
        return Err(Error::InvalidArgument(format!("age must be >= 1, got {age}")));
    }

    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !user_queries::user_exists(&mut *tx, user_id).await? {
        return Err(Error::not_found("user", user_id));
    }

    let calc = profile_queries::insert_calorie_calculation(
        &mut *tx,
        user_id,
        age,
        height_cm,
        weight_kg,
        gender,
        activity_level,
        goal,
        tdee,
        adjusted_calories,
    )
    .await?;

    tx.commit().await.map_err(Error::Store)?;
    info!(user_id, calculation_id = calc.id, "calorie calculation saved");
    Ok(calc)
}

/// List a user's saved calorie calculations, newest first.
pub async fn list_calorie_calculations(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<CalorieCalculation>> {
    if !user_queries::user_exists(pool, user_id).await? {
        return Err(Error::not_found("user", user_id));
    }
    Ok(profile_queries::list_calorie_calculations(pool, user_id).await?)
}

/// Delete one of a user's calorie calculations.
pub async fn delete_calorie_calculation(
    pool: &SqlitePool,
    user_id: i64,
    calculation_id: i64,
) -> Result<()> {
    let removed =
        profile_queries::delete_calorie_calculation(pool, calculation_id, user_id).await?;
    if removed == 0 {
        return Err(Error::not_found("calorie calculation", calculation_id));
    }
    Ok(())
}

/// Record an achievement for a user.
pub async fn record_achievement(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<Achievement> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("achievement name must not be empty".into()));
    }

    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !user_queries::user_exists(&mut *tx, user_id).await? {
        return Err(Error::not_found("user", user_id));
    }

    let achievement =
        profile_queries::insert_achievement(&mut *tx, user_id, name, description).await?;

    tx.commit().await.map_err(Error::Store)?;
    info!(user_id, achievement_id = achievement.id, name, "achievement recorded");
    Ok(achievement)
}

/// List a user's achievements, newest first.
pub async fn list_achievements(pool: &SqlitePool, user_id: i64) -> Result<Vec<Achievement>> {
    if !user_queries::user_exists(pool, user_id).await? {
        return Err(Error::not_found("user", user_id));
    }
    Ok(profile_queries::list_achievements(pool, user_id).await?)
}

/// Delete one of a user's achievements.
pub async fn delete_achievement(
    pool: &SqlitePool,
    user_id: i64,
    achievement_id: i64,
) -> Result<()> {
    let removed = profile_queries::delete_achievement(pool, achievement_id, user_id).await?;
    if removed == 0 {
        return Err(Error::not_found("achievement", achievement_id));
    }
    Ok(())
}

/// Fetch a user's settings. A user who has never written settings has
/// no row, which is reported as not found.
pub async fn get_user_settings(pool: &SqlitePool, user_id: i64) -> Result<UserSetting> {
    if !user_queries::user_exists(pool, user_id).await? {
        return Err(Error::not_found("user", user_id));
    }
    profile_queries::get_user_settings(pool, user_id)
        .await?
        .ok_or_else(|| Error::not_found("user settings", user_id))
}

/// Write a user's settings, replacing any existing row. Each user holds
/// at most one settings row.
pub async fn update_user_settings(
    pool: &SqlitePool,
    user_id: i64,
    daily_goal: Option<i64>,
    dark_mode: bool,
    notifications_enabled: bool,
    notification_time: Option<&str>,
) -> Result<UserSetting> {
    let mut tx = pool.begin().await.map_err(Error::Store)?;

    if !user_queries::user_exists(&mut *tx, user_id).await? {
        return Err(Error::not_found("user", user_id));
    }

    let settings = profile_queries::upsert_user_settings(
        &mut *tx,
        user_id,
        daily_goal,
        dark_mode,
        notifications_enabled,
        notification_time,
    )
    .await?;

    tx.commit().await.map_err(Error::Store)?;
    info!(user_id, "user settings updated");
    Ok(settings)
}
