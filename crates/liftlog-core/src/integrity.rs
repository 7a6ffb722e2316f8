//! Integrity coordinator: explicit delete propagation.
//!
//! The original schema for this domain encoded cascade/restrict/set-null
//! behavior declaratively in FK annotations. Here propagation is a static
//! rule table walked by [`delete_entity`], so the rules are visible in one
//! place and independently testable. The migration's FK clauses carry no
//! ON DELETE actions; they only stop orphaning writes the coordinator did
//! not make itself.

use futures::future::BoxFuture;
use sqlx::SqliteConnection;

use crate::error::{Error, Result};

/// Every entity the coordinator knows how to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    DifficultyLevel,
    ExerciseRegion,
    Exercise,
    WorkoutPlan,
    PlanExercise,
    WorkoutSession,
    SessionExercise,
    SetLog,
    CalorieCalculation,
    Achievement,
    UserSetting,
}

impl Entity {
    /// The backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::DifficultyLevel => "difficulty_levels",
            Self::ExerciseRegion => "exercise_regions",
            Self::Exercise => "exercises",
            Self::WorkoutPlan => "workout_plans",
            Self::PlanExercise => "plan_exercises",
            Self::WorkoutSession => "workout_sessions",
            Self::SessionExercise => "session_exercises",
            Self::SetLog => "set_logs",
            Self::CalorieCalculation => "calorie_calculations",
            Self::Achievement => "achievements",
            Self::UserSetting => "user_settings",
        }
    }

    /// Human-readable name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::DifficultyLevel => "difficulty level",
            Self::ExerciseRegion => "exercise region",
            Self::Exercise => "exercise",
            Self::WorkoutPlan => "workout plan",
            Self::PlanExercise => "plan exercise",
            Self::WorkoutSession => "workout session",
            Self::SessionExercise => "session exercise",
            Self::SetLog => "set log",
            Self::CalorieCalculation => "calorie calculation",
            Self::Achievement => "achievement",
            Self::UserSetting => "user setting",
        }
    }
}

/// What deleting a parent does to rows of a dependent table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// Dependents are deleted with the parent (recursively).
    Cascade,
    /// The dependent's FK column is cleared; the row survives.
    SetNull,
    /// The delete fails while any dependent exists.
    Restrict,
}

/// One propagation rule: deleting a `parent` row affects `child` rows
/// whose `fk` column references it.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub parent: Entity,
    pub child: Entity,
    pub fk: &'static str,
    pub on_delete: OnDelete,
}

/// The full propagation table. One row per FK edge in the schema.
pub const RULES: &[Rule] = &[
    // User owns everything it created.
    Rule { parent: Entity::User, child: Entity::WorkoutPlan, fk: "user_id", on_delete: OnDelete::Cascade },
    Rule { parent: Entity::User, child: Entity::WorkoutSession, fk: "user_id", on_delete: OnDelete::Cascade },
    Rule { parent: Entity::User, child: Entity::CalorieCalculation, fk: "user_id", on_delete: OnDelete::Cascade },
    Rule { parent: Entity::User, child: Entity::Achievement, fk: "user_id", on_delete: OnDelete::Cascade },
    Rule { parent: Entity::User, child: Entity::UserSetting, fk: "user_id", on_delete: OnDelete::Cascade },
    // Catalog reference data is never deleted out from under its users.
    Rule { parent: Entity::DifficultyLevel, child: Entity::Exercise, fk: "difficulty_level_id", on_delete: OnDelete::Restrict },
    Rule { parent: Entity::ExerciseRegion, child: Entity::Exercise, fk: "region_id", on_delete: OnDelete::Restrict },
    Rule { parent: Entity::Exercise, child: Entity::PlanExercise, fk: "exercise_id", on_delete: OnDelete::Restrict },
    Rule { parent: Entity::Exercise, child: Entity::SessionExercise, fk: "exercise_id", on_delete: OnDelete::Restrict },
    // A plan's template rows go with it; sessions derived from it
    // survive as historical records with the reference cleared.
    Rule { parent: Entity::WorkoutPlan, child: Entity::PlanExercise, fk: "plan_id", on_delete: OnDelete::Cascade },
    Rule { parent: Entity::WorkoutPlan, child: Entity::WorkoutSession, fk: "plan_id", on_delete: OnDelete::SetNull },
    // Session rows keep their execution record when the template row is
    // removed; only the provenance pointer is cleared.
    Rule { parent: Entity::PlanExercise, child: Entity::SessionExercise, fk: "plan_exercise_id", on_delete: OnDelete::SetNull },
    // A session owns its subtree.
    Rule { parent: Entity::WorkoutSession, child: Entity::SessionExercise, fk: "session_id", on_delete: OnDelete::Cascade },
    Rule { parent: Entity::SessionExercise, child: Entity::SetLog, fk: "session_exercise_id", on_delete: OnDelete::Cascade },
];

/// The rules where `entity` is the parent.
fn rules_for(entity: Entity) -> impl Iterator<Item = &'static Rule> {
    RULES.iter().filter(move |r| r.parent == entity)
}

/// Whether any rule names `entity` as a parent.
fn has_dependents(entity: Entity) -> bool {
    rules_for(entity).next().is_some()
}

/// Delete a row and apply the propagation table, inside the caller's
/// transaction.
///
/// Order per entity: restrict checks first (any dependent means the whole
/// delete fails with [`Error::IntegrityViolation`] and nothing has been
/// modified), then set-null updates, then cascades (recursive), then the
/// row itself. The function does not verify that the row exists; callers
/// check existence and ownership before invoking it.
pub fn delete_entity<'c>(
    conn: &'c mut SqliteConnection,
    entity: Entity,
    id: i64,
) -> BoxFuture<'c, Result<()>> {
    Box::pin(async move {
        // Restrict before anything is touched.
        for rule in rules_for(entity) {
            if rule.on_delete != OnDelete::Restrict {
                continue;
            }
            let query = format!(
                "SELECT COUNT(*) FROM {} WHERE {} = $1",
                rule.child.table(),
                rule.fk
            );
            let (count,): (i64,) = sqlx::query_as(&query).bind(id).fetch_one(&mut *conn).await?;
            if count > 0 {
                return Err(Error::IntegrityViolation(format!(
                    "cannot delete {} {id}: referenced by {count} {} row(s)",
                    entity.name(),
                    rule.child.table(),
                )));
            }
        }

        for rule in rules_for(entity) {
            match rule.on_delete {
                OnDelete::Restrict => {}
                OnDelete::SetNull => {
                    let query = format!(
                        "UPDATE {} SET {} = NULL WHERE {} = $1",
                        rule.child.table(),
                        rule.fk,
                        rule.fk
                    );
                    sqlx::query(&query).bind(id).execute(&mut *conn).await?;
                }
                OnDelete::Cascade => {
                    if has_dependents(rule.child) {
                        // Children have rules of their own: walk each row.
                        let query = format!(
                            "SELECT id FROM {} WHERE {} = $1",
                            rule.child.table(),
                            rule.fk
                        );
                        let child_ids: Vec<(i64,)> =
                            sqlx::query_as(&query).bind(id).fetch_all(&mut *conn).await?;
                        for (child_id,) in child_ids {
                            delete_entity(&mut *conn, rule.child, child_id).await?;
                        }
                    } else {
                        // Leaf table: one bulk delete.
                        let query = format!(
                            "DELETE FROM {} WHERE {} = $1",
                            rule.child.table(),
                            rule.fk
                        );
                        sqlx::query(&query).bind(id).execute(&mut *conn).await?;
                    }
                }
            }
        }

        let query = format!("DELETE FROM {} WHERE id = $1", entity.table());
        sqlx::query(&query).bind(id).execute(&mut *conn).await?;

        Ok(())
    })
}
