//! Integration tests for delete propagation.
//!
//! Each scenario verifies the full subtree outcome by counting rows
//! directly, since the propagation is driven from code rather than from
//! schema-level referential actions.

use liftlog_core::{catalog, plan, profile, session, setlog, user, Error};
use liftlog_test_utils::{create_test_db, seed_catalog, seed_exercise, seed_user};
use sqlx::SqlitePool;

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count");
    row.0
}

#[tokio::test]
async fn deleting_a_session_removes_its_subtree() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let bench = seed_exercise(&pool, &cat, "bench press").await;
    let row = seed_exercise(&pool, &cat, "barbell row").await;

    let p = plan::create_plan(&pool, user.id, "push day", None).await.expect("plan");
    plan::add_exercise(&pool, user.id, p.id, bench.id, 3, 8, None, None).await.expect("a");
    plan::add_exercise(&pool, user.id, p.id, row.id, 2, 10, None, None).await.expect("b");

    let (s, _) = session::start_session_from_plan(&pool, user.id, p.id, None)
        .await
        .expect("start");
    assert_eq!(count(&pool, "session_exercises").await, 2);
    assert_eq!(count(&pool, "set_logs").await, 5);

    session::delete_session(&pool, user.id, s.id).await.expect("delete");

    assert_eq!(count(&pool, "workout_sessions").await, 0);
    assert_eq!(count(&pool, "session_exercises").await, 0);
    assert_eq!(count(&pool, "set_logs").await, 0);

    // The plan and its prescriptions are untouched.
    assert_eq!(count(&pool, "workout_plans").await, 1);
    assert_eq!(count(&pool, "plan_exercises").await, 2);
}

#[tokio::test]
async fn deleting_a_plan_preserves_session_history() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;

    let p = plan::create_plan(&pool, user.id, "leg day", None).await.expect("plan");
    plan::add_exercise(&pool, user.id, p.id, squat.id, 3, 5, None, None).await.expect("add");

    let (s, _) = session::start_session_from_plan(&pool, user.id, p.id, None)
        .await
        .expect("start");
    session::end_session(&pool, user.id, s.id, Some(45), None).await.expect("end");

    plan::delete_plan(&pool, user.id, p.id).await.expect("delete plan");

    assert_eq!(count(&pool, "workout_plans").await, 0);
    assert_eq!(count(&pool, "plan_exercises").await, 0);

    // The ended session survives with its provenance cleared.
    let detail = session::get_session(&pool, user.id, s.id).await.expect("fetch");
    assert_eq!(detail.session.plan_id, None);
    assert_eq!(detail.session.duration_minutes, Some(45));
    assert_eq!(detail.exercises.len(), 1);
    assert_eq!(detail.exercises[0].exercise.plan_exercise_id, None);
    assert_eq!(detail.exercises[0].sets.len(), 3);
}

#[tokio::test]
async fn removing_a_prescription_clears_only_the_back_reference() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;

    let p = plan::create_plan(&pool, user.id, "leg day", None).await.expect("plan");
    let pe = plan::add_exercise(&pool, user.id, p.id, squat.id, 2, 5, None, None)
        .await
        .expect("add");
    let (s, _) = session::start_session_from_plan(&pool, user.id, p.id, None)
        .await
        .expect("start");

    plan::remove_exercise(&pool, user.id, p.id, pe.id).await.expect("remove");

    let detail = session::get_session(&pool, user.id, s.id).await.expect("fetch");
    assert_eq!(detail.exercises.len(), 1);
    assert_eq!(detail.exercises[0].exercise.plan_exercise_id, None);
    assert_eq!(detail.exercises[0].sets.len(), 2);
}

#[tokio::test]
async fn referenced_catalog_rows_refuse_deletion() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;

    let p = plan::create_plan(&pool, user.id, "leg day", None).await.expect("plan");
    plan::add_exercise(&pool, user.id, p.id, squat.id, 3, 5, None, None).await.expect("add");

    // Exercise is referenced by a prescription.
    let err = catalog::delete_exercise(&pool, squat.id).await.unwrap_err();
    assert!(matches!(err, Error::IntegrityViolation(_)), "got {err:?}");

    // Level and region are referenced by the exercise.
    let err = catalog::delete_difficulty_level(&pool, cat.level.id).await.unwrap_err();
    assert!(matches!(err, Error::IntegrityViolation(_)), "got {err:?}");
    let err = catalog::delete_region(&pool, cat.region.id).await.unwrap_err();
    assert!(matches!(err, Error::IntegrityViolation(_)), "got {err:?}");

    // Nothing was touched.
    assert_eq!(count(&pool, "exercises").await, 1);
    assert_eq!(count(&pool, "plan_exercises").await, 1);

    // Once the reference is gone the delete goes through.
    plan::delete_plan(&pool, user.id, p.id).await.expect("delete plan");
    catalog::delete_exercise(&pool, squat.id).await.expect("delete exercise");
    assert_eq!(count(&pool, "exercises").await, 0);
}

#[tokio::test]
async fn exercise_referenced_by_a_session_refuses_deletion() {
    let pool = create_test_db().await;
    let u = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let bench = seed_exercise(&pool, &cat, "bench press").await;

    let s = session::start_free_session(&pool, u.id, None).await.expect("session");
    setlog::add_exercise_to_session(&pool, u.id, s.id, bench.id, None)
        .await
        .expect("add exercise");

    let err = catalog::delete_exercise(&pool, bench.id).await.unwrap_err();
    assert!(matches!(err, Error::IntegrityViolation(_)), "got {err:?}");
}

#[tokio::test]
async fn deleting_a_user_cascades_across_all_owned_tables() {
    let pool = create_test_db().await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;

    // Alice's tree: plan, prescriptions, session, set logs, plus the
    // satellite rows keyed directly on the user.
    let p = plan::create_plan(&pool, alice.id, "leg day", None).await.expect("plan");
    plan::add_exercise(&pool, alice.id, p.id, squat.id, 3, 5, None, None).await.expect("add");
    session::start_session_from_plan(&pool, alice.id, p.id, None).await.expect("start");

    profile::save_calorie_calculation(
        &pool, alice.id, 30, 180.0, 80.0, "male", "moderate", "maintain", 2600.0, 2600.0,
    )
    .await
    .expect("calorie row");
    profile::record_achievement(&pool, alice.id, "first session", None)
        .await
        .expect("achievement row");
    profile::update_user_settings(&pool, alice.id, Some(3), true, true, Some("07:00"))
        .await
        .expect("settings row");

    // Bob's tree must survive untouched.
    let bp = plan::create_plan(&pool, bob.id, "bob plan", None).await.expect("bob plan");
    plan::add_exercise(&pool, bob.id, bp.id, squat.id, 2, 8, None, None).await.expect("bob add");
    session::start_session_from_plan(&pool, bob.id, bp.id, None).await.expect("bob start");

    user::delete_user(&pool, alice.id).await.expect("delete alice");

    assert_eq!(count(&pool, "users").await, 1);
    assert_eq!(count(&pool, "workout_plans").await, 1);
    assert_eq!(count(&pool, "plan_exercises").await, 1);
    assert_eq!(count(&pool, "workout_sessions").await, 1);
    assert_eq!(count(&pool, "session_exercises").await, 1);
    assert_eq!(count(&pool, "set_logs").await, 2);
    assert_eq!(count(&pool, "calorie_calculations").await, 0);
    assert_eq!(count(&pool, "achievements").await, 0);
    assert_eq!(count(&pool, "user_settings").await, 0);

    // Catalog rows are shared, not owned.
    assert_eq!(count(&pool, "exercises").await, 1);

    let err = user::get_user(&pool, alice.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}
