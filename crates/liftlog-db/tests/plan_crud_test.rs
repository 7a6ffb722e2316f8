//! Integration tests for the raw query layer.
//!
//! Each test runs against its own in-memory SQLite database with
//! migrations applied. Semantics above the query layer (ownership
//! errors, delete propagation) are covered in liftlog-core's tests.

use sqlx::SqlitePool;

use liftlog_db::pool;
use liftlog_db::queries::{catalog, plans, sessions, set_logs, users};

async fn migrated_pool() -> SqlitePool {
    let pool = pool::create_memory_pool()
        .await
        .expect("failed to create in-memory database");
    pool::run_migrations(&pool)
        .await
        .expect("migrations should succeed");
    pool
}

async fn seed_exercise(pool: &SqlitePool, name: &str) -> liftlog_db::models::Exercise {
    // Level and region names are unique; reuse rows seeded earlier in
    // the same test.
    let level_id = match catalog::list_difficulty_levels(pool).await.expect("levels").first() {
        Some(level) => level.id,
        None => {
            catalog::insert_difficulty_level(pool, "intermediate")
                .await
                .expect("level")
                .id
        }
    };
    let region_id = match catalog::list_regions(pool).await.expect("regions").first() {
        Some(region) => region.id,
        None => catalog::insert_region(pool, "upper body").await.expect("region").id,
    };
    catalog::insert_exercise(pool, name, None, None, None, level_id, region_id)
        .await
        .expect("exercise")
}

#[tokio::test]
async fn insert_and_fetch_user() {
    let pool = migrated_pool().await;

    let user = users::insert_user(&pool, "alice", "alice@example.com", "hash")
        .await
        .expect("insert");
    assert_eq!(user.username, "alice");

    let fetched = users::get_user(&pool, user.id).await.expect("get");
    assert_eq!(fetched.map(|u| u.email), Some("alice@example.com".into()));

    assert!(users::user_exists(&pool, user.id).await.expect("exists"));
    assert!(!users::user_exists(&pool, user.id + 1).await.expect("absent"));
}

#[tokio::test]
async fn duplicate_username_is_a_unique_violation() {
    let pool = migrated_pool().await;

    users::insert_user(&pool, "alice", "alice@example.com", "hash")
        .await
        .expect("first");
    let err = users::insert_user(&pool, "alice", "other@example.com", "hash")
        .await
        .expect_err("duplicate username");
    let db_err = err.as_database_error().expect("database error");
    assert!(db_err.is_unique_violation(), "got: {}", db_err.message());
}

#[tokio::test]
async fn plan_exercises_list_nulls_last() {
    let pool = migrated_pool().await;
    let user = users::insert_user(&pool, "alice", "alice@example.com", "hash")
        .await
        .expect("user");
    let a = seed_exercise(&pool, "bench press").await;
    let b = seed_exercise(&pool, "dips").await;
    let c = seed_exercise(&pool, "incline press").await;

    let plan = plans::insert_plan(&pool, user.id, "push day", None).await.expect("plan");

    // Unordered row first, then explicit orders out of insertion order.
    plans::insert_plan_exercise(&pool, plan.id, a.id, 3, 8, None, None)
        .await
        .expect("a");
    plans::insert_plan_exercise(&pool, plan.id, b.id, 3, 10, None, Some(2))
        .await
        .expect("b");
    plans::insert_plan_exercise(&pool, plan.id, c.id, 3, 12, None, Some(1))
        .await
        .expect("c");

    let rows = plans::list_plan_exercises(&pool, plan.id).await.expect("list");
    let ids: Vec<i64> = rows.iter().map(|r| r.exercise_id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);

    // next order counts only explicit orders.
    let next = plans::next_order_in_plan(&pool, plan.id).await.expect("next");
    assert_eq!(next, 3);
}

#[tokio::test]
async fn end_session_guard_fires_only_once() {
    let pool = migrated_pool().await;
    let user = users::insert_user(&pool, "alice", "alice@example.com", "hash")
        .await
        .expect("user");

    let session = sessions::insert_session(&pool, user.id, None, Some("gym"))
        .await
        .expect("session");
    assert!(session.duration_minutes.is_none());

    let ended = sessions::end_session(&pool, session.id, user.id, 42, None)
        .await
        .expect("end");
    let ended = ended.expect("one row updated");
    assert_eq!(ended.duration_minutes, Some(42));
    assert_eq!(ended.notes.as_deref(), Some("gym"));

    // Second attempt matches zero rows.
    let again = sessions::end_session(&pool, session.id, user.id, 99, None)
        .await
        .expect("query ok");
    assert!(again.is_none());
}

#[tokio::test]
async fn upsert_set_log_returns_the_surviving_row() {
    let pool = migrated_pool().await;
    let user = users::insert_user(&pool, "alice", "alice@example.com", "hash")
        .await
        .expect("user");
    let exercise_id = seed_exercise(&pool, "squat").await.id;
    let session = sessions::insert_session(&pool, user.id, None, None).await.expect("session");
    let se = sessions::insert_session_exercise(&pool, session.id, exercise_id, None, Some(1))
        .await
        .expect("session exercise");

    let placeholder = set_logs::insert_placeholder(&pool, se.id, 1).await.expect("placeholder");
    assert!(!placeholder.is_completed);

    let updated = set_logs::upsert_set_log(&pool, se.id, 1, Some(100.0), Some(5), true, None)
        .await
        .expect("upsert");
    assert_eq!(updated.id, placeholder.id);
    assert_eq!(updated.weight, Some(100.0));
    assert!(updated.is_completed);

    let fresh = set_logs::upsert_set_log(&pool, se.id, 2, Some(90.0), Some(5), true, None)
        .await
        .expect("upsert new");
    assert_ne!(fresh.id, placeholder.id);

    let all = set_logs::list_set_logs(&pool, se.id).await.expect("list");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].set_number, 1);
    assert_eq!(all[1].set_number, 2);
}
