//! Integration tests for plan CRUD and prescription ordering.

use liftlog_core::{plan, Error};
use liftlog_test_utils::{create_test_db, seed_catalog, seed_exercise, seed_user};

#[tokio::test]
async fn create_and_fetch_plan() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;

    let created = plan::create_plan(&pool, user.id, "push day", Some("chest and triceps"))
        .await
        .expect("create");
    assert_eq!(created.name, "push day");

    let detail = plan::get_plan(&pool, user.id, created.id).await.expect("fetch");
    assert_eq!(detail.plan.id, created.id);
    assert_eq!(detail.plan.description.as_deref(), Some("chest and triceps"));
    assert!(detail.exercises.is_empty());
}

#[tokio::test]
async fn create_plan_rejects_unknown_user_and_empty_name() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;

    let err = plan::create_plan(&pool, 9999, "ghost", None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = plan::create_plan(&pool, user.id, "   ", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");
}

#[tokio::test]
async fn order_defaults_to_max_plus_one_without_reusing_gaps() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let a = seed_exercise(&pool, &cat, "bench press").await;
    let b = seed_exercise(&pool, &cat, "incline press").await;
    let c = seed_exercise(&pool, &cat, "dips").await;

    let p = plan::create_plan(&pool, user.id, "push day", None).await.expect("plan");

    let first = plan::add_exercise(&pool, user.id, p.id, a.id, 3, 8, None, Some(1))
        .await
        .expect("add a");
    assert_eq!(first.order_in_plan, Some(1));

    // Explicit order 3 leaves a gap at 2.
    plan::add_exercise(&pool, user.id, p.id, b.id, 3, 10, None, Some(3))
        .await
        .expect("add b");

    // Default order is max + 1, not the gap.
    let third = plan::add_exercise(&pool, user.id, p.id, c.id, 3, 12, None, None)
        .await
        .expect("add c");
    assert_eq!(third.order_in_plan, Some(4));
}

#[tokio::test]
async fn first_default_order_is_one() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;

    let p = plan::create_plan(&pool, user.id, "leg day", None).await.expect("plan");
    let pe = plan::add_exercise(&pool, user.id, p.id, squat.id, 5, 5, None, None)
        .await
        .expect("add");
    assert_eq!(pe.order_in_plan, Some(1));
}

#[tokio::test]
async fn duplicate_exercise_in_plan_is_a_conflict() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;

    let p = plan::create_plan(&pool, user.id, "leg day", None).await.expect("plan");
    plan::add_exercise(&pool, user.id, p.id, squat.id, 5, 5, None, None)
        .await
        .expect("first add");

    let err = plan::add_exercise(&pool, user.id, p.id, squat.id, 3, 8, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn add_exercise_validates_references_and_prescription() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;

    let p = plan::create_plan(&pool, user.id, "leg day", None).await.expect("plan");

    let err = plan::add_exercise(&pool, user.id, p.id, 9999, 3, 8, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidReference { .. }), "got {err:?}");

    let err = plan::add_exercise(&pool, user.id, 9999, squat.id, 3, 8, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");

    let err = plan::add_exercise(&pool, user.id, p.id, squat.id, 0, 8, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");

    let err = plan::add_exercise(&pool, user.id, p.id, squat.id, 3, 0, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");
}

#[tokio::test]
async fn update_and_remove_prescription() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;
    let lunge = seed_exercise(&pool, &cat, "lunge").await;

    let p = plan::create_plan(&pool, user.id, "leg day", None).await.expect("plan");
    let pe = plan::add_exercise(&pool, user.id, p.id, squat.id, 5, 5, Some(180), None)
        .await
        .expect("add");

    // Swap the exercise and change the prescription in place.
    plan::update_exercise(&pool, user.id, p.id, pe.id, lunge.id, 4, 10, Some(60), Some(2))
        .await
        .expect("update");

    let detail = plan::get_plan(&pool, user.id, p.id).await.expect("fetch");
    assert_eq!(detail.exercises.len(), 1);
    assert_eq!(detail.exercises[0].exercise_id, lunge.id);
    assert_eq!(detail.exercises[0].sets, 4);
    assert_eq!(detail.exercises[0].reps, 10);
    assert_eq!(detail.exercises[0].rest_seconds, Some(60));
    assert_eq!(detail.exercises[0].order_in_plan, Some(2));

    // Swapping to an unknown exercise is rejected.
    let err = plan::update_exercise(&pool, user.id, p.id, pe.id, 9999, 4, 10, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidReference { .. }), "got {err:?}");

    plan::remove_exercise(&pool, user.id, p.id, pe.id).await.expect("remove");
    let detail = plan::get_plan(&pool, user.id, p.id).await.expect("fetch again");
    assert!(detail.exercises.is_empty());
}

#[tokio::test]
async fn list_plans_reports_exercise_counts() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;
    let cat = seed_catalog(&pool).await;
    let squat = seed_exercise(&pool, &cat, "squat").await;
    let bench = seed_exercise(&pool, &cat, "bench press").await;

    let p1 = plan::create_plan(&pool, user.id, "leg day", None).await.expect("p1");
    plan::add_exercise(&pool, user.id, p1.id, squat.id, 5, 5, None, None)
        .await
        .expect("add 1");
    plan::add_exercise(&pool, user.id, p1.id, bench.id, 3, 8, None, None)
        .await
        .expect("add 2");
    plan::create_plan(&pool, user.id, "rest day", None).await.expect("p2");

    let plans = plan::list_plans(&pool, user.id).await.expect("list");
    assert_eq!(plans.len(), 2);

    let by_name = |name: &str| plans.iter().find(|p| p.name == name).expect("plan present");
    assert_eq!(by_name("leg day").exercise_count, 2);
    assert_eq!(by_name("rest day").exercise_count, 0);
}

#[tokio::test]
async fn rename_plan() {
    let pool = create_test_db().await;
    let user = seed_user(&pool, "alice").await;

    let p = plan::create_plan(&pool, user.id, "push day", None).await.expect("plan");
    plan::update_plan(&pool, user.id, p.id, "push day v2", Some("rebalanced"))
        .await
        .expect("update");

    let detail = plan::get_plan(&pool, user.id, p.id).await.expect("fetch");
    assert_eq!(detail.plan.name, "push day v2");
    assert_eq!(detail.plan.description.as_deref(), Some("rebalanced"));

    let err = plan::update_plan(&pool, user.id, 9999, "nope", None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}
