mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::app::spawn_test_app;
use common::fixtures::seed_user;
use common::http::{assert_json_error, assert_status_ok_json, request, response_json};
use tutor_backend::store::operations::users::Subscription;

#[tokio::test]
async fn it_language_lesson_matches_beginner_level() {
    let app = spawn_test_app().await;
    seed_user(app.state.store(), "u1", "ana", Subscription::Free);

    let resp = request(&app.app, Method::POST, "/api/users/u1/lessons/language", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["difficulty"], "beginner");
    assert!(body["data"]["lesson"]["title"].is_string());
    assert!(body["data"]["lesson"]["exercise"]["options"].is_array());
    assert_eq!(body["data"]["lessonsRemainingToday"], 4);
}

#[tokio::test]
async fn it_math_lesson_scales_xp_reward_with_level() {
    let app = spawn_test_app().await;
    seed_user(app.state.store(), "u1", "ana", Subscription::Free);

    let resp = request(&app.app, Method::POST, "/api/users/u1/lessons/math", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    // Level 1 learner: reward is level * 5
    assert_eq!(body["data"]["exercise"]["xpReward"], 5);
    assert_eq!(body["data"]["exercise"]["difficulty"], "easy");
    assert!(body["data"]["exercise"]["problem"].is_string());
    assert!(body["data"]["exercise"]["solution"].is_string());
}

#[tokio::test]
async fn it_math_lesson_prefers_weak_topics() {
    let app = spawn_test_app().await;
    seed_user(app.state.store(), "u1", "ana", Subscription::Free);

    let mut profile = app.state.store().get_profile("u1").unwrap().unwrap();
    profile.weak_topics.insert("division".to_string());
    app.state.store().save_profile(&profile).unwrap();

    let resp = request(&app.app, Method::POST, "/api/users/u1/lessons/math", None).await;
    let (_, _, body) = response_json(resp).await;
    assert_eq!(body["data"]["exercise"]["topic"], "division");
}

#[tokio::test]
async fn it_free_tier_hits_daily_lesson_limit() {
    let app = spawn_test_app().await;
    seed_user(app.state.store(), "u1", "ana", Subscription::Free);

    for _ in 0..5 {
        let resp = request(&app.app, Method::POST, "/api/users/u1/lessons/math", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = request(&app.app, Method::POST, "/api/users/u1/lessons/language", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_json_error(&body, "LESSON_LIMIT_REACHED");
}

#[tokio::test]
async fn it_premium_tier_outlasts_free_limit() {
    let app = spawn_test_app().await;
    seed_user(app.state.store(), "u1", "ana", Subscription::Premium);

    for _ in 0..6 {
        let resp = request(&app.app, Method::POST, "/api/users/u1/lessons/language", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn it_vocabulary_review_returns_five_words_and_is_free() {
    let app = spawn_test_app().await;
    seed_user(app.state.store(), "u1", "ana", Subscription::Free);

    // Exhaust the lesson allowance first; review picks must still work
    for _ in 0..5 {
        request(&app.app, Method::POST, "/api/users/u1/lessons/math", None).await;
    }

    let resp = request(&app.app, Method::GET, "/api/users/u1/lessons/vocabulary", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["unit"], "basics");
    assert_eq!(body["data"]["words"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn it_lessons_for_unknown_user_are_404() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::POST, "/api/users/ghost/lessons/language", None).await;
    let (status, _, _) = response_json(resp).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
