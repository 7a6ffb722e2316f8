use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle state of a workout session.
///
/// Not stored as its own column: a session is `Ended` exactly when its
/// `duration_minutes` is set, which only `end_session` does. The transition
/// is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Ended => "ended",
        };
        f.write_str(s)
    }
}

impl FromStr for SessionState {
    type Err = SessionStateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            other => Err(SessionStateParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`SessionState`] string.
#[derive(Debug, Clone, Error)]
#[error("invalid session state: {0:?}")]
pub struct SessionStateParseError(pub String);

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// A registered user. Owns plans, sessions, and the satellite rows.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog reference data: exercise difficulty.
#[derive(Debug, Clone, FromRow)]
pub struct DifficultyLevel {
    pub id: i64,
    pub name: String,
}

/// Catalog reference data: body region an exercise targets.
#[derive(Debug, Clone, FromRow)]
pub struct ExerciseRegion {
    pub id: i64,
    pub name: String,
}

/// A catalog exercise. Shared reference data, never owned by a plan or
/// session; cannot be deleted while referenced.
#[derive(Debug, Clone, FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub difficulty_level_id: i64,
    pub region_id: i64,
}

/// A workout plan -- a user-owned template of ordered exercise
/// prescriptions.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutPlan {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One exercise prescription within a plan.
#[derive(Debug, Clone, FromRow)]
pub struct PlanExercise {
    pub id: i64,
    pub plan_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub rest_seconds: Option<i64>,
    pub order_in_plan: Option<i64>,
}

/// A workout session -- one concrete, timestamped execution, optionally
/// derived from a plan. `plan_id` is nulled if the plan is later deleted;
/// the session keeps its own copied data.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutSession {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: Option<i64>,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

impl WorkoutSession {
    /// Derive the lifecycle state from the duration column.
    pub fn state(&self) -> SessionState {
        if self.duration_minutes.is_some() {
            SessionState::Ended
        } else {
            SessionState::Active
        }
    }
}

/// An exercise executed (or planned for execution) within a session.
/// `plan_exercise_id` records provenance when the row was materialized
/// from a plan; it is NULL for ad-hoc additions and nulled if the
/// originating plan exercise is deleted.
#[derive(Debug, Clone, FromRow)]
pub struct SessionExercise {
    pub id: i64,
    pub session_id: i64,
    pub exercise_id: i64,
    pub plan_exercise_id: Option<i64>,
    pub order_in_session: Option<i64>,
}

/// The recorded outcome of one set. `completed_at` is derived from
/// `is_completed` and never independently settable.
#[derive(Debug, Clone, FromRow)]
pub struct SetLog {
    pub id: i64,
    pub session_exercise_id: i64,
    pub set_number: i64,
    pub weight: Option<f64>,
    pub reps_completed: Option<i64>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A stored calorie calculation result (user-owned satellite row).
#[derive(Debug, Clone, FromRow)]
pub struct CalorieCalculation {
    pub id: i64,
    pub user_id: i64,
    pub age: i64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub gender: String,
    pub activity_level: String,
    pub goal: String,
    pub tdee: f64,
    pub adjusted_calories: f64,
    pub calculated_at: DateTime<Utc>,
}

/// An earned achievement (user-owned satellite row).
#[derive(Debug, Clone, FromRow)]
pub struct Achievement {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub achieved_at: DateTime<Utc>,
}

/// Per-user preferences (user-owned satellite row, one per user).
#[derive(Debug, Clone, FromRow)]
pub struct UserSetting {
    pub id: i64,
    pub user_id: i64,
    pub daily_goal: Option<i64>,
    pub dark_mode: bool,
    pub notifications_enabled: bool,
    pub notification_time: Option<String>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
