//! Cross-user access must look identical to the row not existing.

use liftlog_core::{plan, session, setlog, Error};
use liftlog_test_utils::{create_test_db, seed_catalog, seed_exercise, seed_user};

#[tokio::test]
async fn another_users_plan_is_invisible() {
    let pool = create_test_db().await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;

    let p = plan::create_plan(&pool, alice.id, "leg day", None).await.expect("plan");
    let pe = plan::add_exercise(&pool, alice.id, p.id, squat.id, 3, 5, None, None)
        .await
        .expect("add");

    let err = plan::get_plan(&pool, bob.id, p.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = plan::update_plan(&pool, bob.id, p.id, "stolen", None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = plan::add_exercise(&pool, bob.id, p.id, squat.id, 3, 5, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = plan::remove_exercise(&pool, bob.id, p.id, pe.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = plan::delete_plan(&pool, bob.id, p.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    // Listing only sees the caller's rows.
    assert!(plan::list_plans(&pool, bob.id).await.expect("list").is_empty());
    assert_eq!(plan::list_plans(&pool, alice.id).await.expect("list").len(), 1);
}

#[tokio::test]
async fn another_users_session_is_invisible() {
    let pool = create_test_db().await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let cat = seed_catalog(&pool).await;
    let bench = seed_exercise(&pool, &cat, "bench press").await;

    let s = session::start_free_session(&pool, alice.id, None).await.expect("session");
    let se = setlog::add_exercise_to_session(&pool, alice.id, s.id, bench.id, None)
        .await
        .expect("add exercise");
    let log = setlog::log_set(&pool, alice.id, se.id, 1, Some(60.0), Some(8), true)
        .await
        .expect("log");

    let err = session::get_session(&pool, bob.id, s.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = session::end_session(&pool, bob.id, s.id, None, None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = session::delete_session(&pool, bob.id, s.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = setlog::add_exercise_to_session(&pool, bob.id, s.id, bench.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = setlog::log_set(&pool, bob.id, se.id, 1, Some(200.0), Some(1), true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = setlog::get_set_log(&pool, bob.id, log.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = setlog::delete_set_log(&pool, bob.id, log.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    // Nothing leaked and nothing changed.
    let detail = session::get_session(&pool, alice.id, s.id).await.expect("still there");
    assert_eq!(detail.exercises.len(), 1);
    assert_eq!(detail.exercises[0].sets.len(), 1);
    assert_eq!(detail.exercises[0].sets[0].weight, Some(60.0));
}

#[tokio::test]
async fn starting_a_session_from_someone_elses_plan_fails() {
    let pool = create_test_db().await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    let p = plan::create_plan(&pool, alice.id, "leg day", None).await.expect("plan");

    let err = session::start_session_from_plan(&pool, bob.id, p.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}
