//! Shared test utilities for liftlog integration tests.
//!
//! Each test gets its own in-memory SQLite database with migrations
//! applied, so tests are fully isolated and need no external services.
//! The pool is capped at one connection: an in-memory SQLite database
//! exists per connection, and a single connection keeps every query in
//! a test on the same database.

use sqlx::SqlitePool;

use liftlog_db::models::{DifficultyLevel, Exercise, ExerciseRegion, User};
use liftlog_db::pool;
use liftlog_db::queries::{catalog, users};

/// Create a fresh in-memory database with migrations applied.
pub async fn create_test_db() -> SqlitePool {
    let pool = pool::create_memory_pool()
        .await
        .expect("failed to create in-memory database");
    pool::run_migrations(&pool)
        .await
        .expect("migrations should succeed");
    pool
}

/// Insert a user with deterministic email derived from the username.
pub async fn seed_user(pool: &SqlitePool, username: &str) -> User {
    users::insert_user(
        pool,
        username,
        &format!("{username}@example.com"),
        "not-a-real-hash",
    )
    .await
    .expect("seed user should insert")
}

/// A minimal catalog: one difficulty level and one region.
pub struct Catalog {
    pub level: DifficultyLevel,
    pub region: ExerciseRegion,
}

/// Insert one difficulty level and one region.
pub async fn seed_catalog(pool: &SqlitePool) -> Catalog {
    let level = catalog::insert_difficulty_level(pool, "intermediate")
        .await
        .expect("seed level should insert");
    let region = catalog::insert_region(pool, "upper body")
        .await
        .expect("seed region should insert");
    Catalog { level, region }
}

/// Insert an exercise against the seeded catalog.
pub async fn seed_exercise(pool: &SqlitePool, cat: &Catalog, name: &str) -> Exercise {
    catalog::insert_exercise(pool, name, None, None, None, cat.level.id, cat.region.id)
        .await
        .expect("seed exercise should insert")
}
