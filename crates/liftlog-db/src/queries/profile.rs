//! Database query functions for the user-owned profile tables:
//! `calorie_calculations`, `achievements`, and `user_settings`.

use chrono::Utc;
use sqlx::SqliteExecutor;

use crate::models::{Achievement, CalorieCalculation, UserSetting};

/// Insert a saved calorie calculation for a user.
pub async fn insert_calorie_calculation<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
    age: i64,
    height_cm: f64,
    weight_kg: f64,
    gender: &str,
    activity_level: &str,
    goal: &str,
    tdee: f64,
    adjusted_calories: f64,
) -> Result<CalorieCalculation, sqlx::Error> {
    sqlx::query_as::<_, CalorieCalculation>(
        "INSERT INTO calorie_calculations \
             (user_id, age, height_cm, weight_kg, gender, activity_level, goal, \
              tdee, adjusted_calories, calculated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING *",
    )
    .bind(user_id)
    .bind(age)
    .bind(height_cm)
    .bind(weight_kg)
    .bind(gender)
    .bind(activity_level)
    .bind(goal)
    .bind(tdee)
    .bind(adjusted_calories)
    .bind(Utc::now())
    .fetch_one(ex)
    .await
}

/// List a user's calorie calculations, newest first.
pub async fn list_calorie_calculations<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
) -> Result<Vec<CalorieCalculation>, sqlx::Error> {
    sqlx::query_as::<_, CalorieCalculation>(
        "SELECT * FROM calorie_calculations \
         WHERE user_id = $1 \
         ORDER BY calculated_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(ex)
    .await
}

/// Delete one of a user's calorie calculations. Returns the number of
/// rows removed so the caller can distinguish a miss.
pub async fn delete_calorie_calculation<'e>(
    ex: impl SqliteExecutor<'e>,
    calculation_id: i64,
    user_id: i64,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM calorie_calculations WHERE id = $1 AND user_id = $2")
            .bind(calculation_id)
            .bind(user_id)
            .execute(ex)
            .await?;
    Ok(result.rows_affected())
}

/// Insert an achievement row for a user.
pub async fn insert_achievement<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<Achievement, sqlx::Error> {
    sqlx::query_as::<_, Achievement>(
        "INSERT INTO achievements (user_id, name, description, achieved_at) \
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

/// List a user's achievements, newest first.
pub async fn list_achievements<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
) -> Result<Vec<Achievement>, sqlx::Error> {
    sqlx::query_as::<_, Achievement>(
        "SELECT * FROM achievements \
         WHERE user_id = $1 \
         ORDER BY achieved_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(ex)
    .await
}

/// Delete one of a user's achievements. Returns the number of rows
/// removed so the caller can distinguish a miss.
pub async fn delete_achievement<'e>(
    ex: impl SqliteExecutor<'e>,
    achievement_id: i64,
    user_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM achievements WHERE id = $1 AND user_id = $2")
        .bind(achievement_id)
        .bind(user_id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected())
}

/// Fetch a user's settings row, if one has been written.
pub async fn get_user_settings<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
) -> Result<Option<UserSetting>, sqlx::Error> {
    sqlx::query_as::<_, UserSetting>("SELECT * FROM user_settings WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(ex)
        .await
}

/// Upsert a user's settings through the `user_id` UNIQUE constraint, so
/// each user holds at most one row and the last write wins.
pub async fn upsert_user_settings<'e>(
    ex: impl SqliteExecutor<'e>,
    user_id: i64,
    daily_goal: Option<i64>,
    dark_mode: bool,
    notifications_enabled: bool,
    notification_time: Option<&str>,
) -> Result<UserSetting, sqlx::Error> {
    sqlx::query_as::<_, UserSetting>(
        "INSERT INTO user_settings \
             (user_id, daily_goal, dark_mode, notifications_enabled, notification_time, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (user_id) DO UPDATE SET \
             daily_goal = excluded.daily_goal, \
             dark_mode = excluded.dark_mode, \
             notifications_enabled = excluded.notifications_enabled, \
             notification_time = excluded.notification_time, \
             updated_at = excluded.updated_at \
         RETURNING *",
    )
    .bind(user_id)
    .bind(daily_goal)
    .bind(dark_mode)
    .bind(notifications_enabled)
    .bind(notification_time)
    .bind(Utc::now())
    .fetch_one(ex)
    .await
}
