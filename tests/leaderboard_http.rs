mod common;

use axum::http::Method;

use common::app::spawn_test_app;
use common::fixtures::{seed_user, set_profile_position};
use common::http::{assert_status_ok_json, request, response_json};
use tutor_backend::store::operations::users::Subscription;

#[tokio::test]
async fn it_leaderboard_orders_by_total_xp() {
    let app = spawn_test_app().await;
    for (id, name, xp) in [("u1", "ana", 100_u64), ("u2", "leo", 900), ("u3", "mia", 400)] {
        seed_user(app.state.store(), id, name, Subscription::Free);
        set_profile_position(app.state.store(), id, xp, 0);
    }

    let resp = request(&app.app, Method::GET, "/api/leaderboard/", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);

    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["username"], "leo");
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["totalXp"], 900);
    assert_eq!(entries[0]["globalLevel"], 4);
    assert_eq!(entries[1]["username"], "mia");
    assert_eq!(entries[2]["username"], "ana");
}

#[tokio::test]
async fn it_leaderboard_respects_limit() {
    let app = spawn_test_app().await;
    for idx in 0..5_u64 {
        let id = format!("u{idx}");
        seed_user(app.state.store(), &id, &format!("user {idx}"), Subscription::Free);
        set_profile_position(app.state.store(), &id, idx * 50, 0);
    }

    let resp = request(&app.app, Method::GET, "/api/leaderboard/?limit=2", None).await;
    let (_, _, body) = response_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn it_leaderboard_is_read_only() {
    let app = spawn_test_app().await;
    seed_user(app.state.store(), "u1", "ana", Subscription::Free);
    set_profile_position(app.state.store(), "u1", 123, 3);

    let before = serde_json::to_value(app.state.store().get_profile("u1").unwrap()).unwrap();
    let _ = request(&app.app, Method::GET, "/api/leaderboard/", None).await;
    let after = serde_json::to_value(app.state.store().get_profile("u1").unwrap()).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn it_empty_leaderboard_is_empty_list() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::GET, "/api/leaderboard/", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
