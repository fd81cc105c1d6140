mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::app::{spawn_test_app, spawn_test_app_without_coach};
use common::fixtures::seed_user;
use common::http::{assert_json_error, assert_status_ok_json, request, response_json};
use tutor_backend::store::operations::users::Subscription;

#[tokio::test]
async fn it_daily_plan_returns_mock_plan() {
    let app = spawn_test_app().await;
    seed_user(app.state.store(), "u1", "ana", Subscription::Free);

    let resp = request(
        &app.app,
        Method::POST,
        "/api/users/u1/coach/daily-plan",
        None,
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["estimatedTimeMinutes"], 30);
    assert!(body["data"]["goals"].as_str().unwrap().contains("vocabulary"));
}

#[tokio::test]
async fn it_daily_plan_without_profile_is_404() {
    let app = spawn_test_app().await;

    let resp = request(
        &app.app,
        Method::POST,
        "/api/users/ghost/coach/daily-plan",
        None,
    )
    .await;
    let (status, _, _) = response_json(resp).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn it_disabled_coach_is_503() {
    let app = spawn_test_app_without_coach().await;
    seed_user(app.state.store(), "u1", "ana", Subscription::Free);

    let resp = request(
        &app.app,
        Method::POST,
        "/api/users/u1/coach/daily-plan",
        None,
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_json_error(&body, "COACH_DISABLED");
}

#[tokio::test]
async fn it_question_gets_mock_answer() {
    let app = spawn_test_app().await;

    let resp = request(
        &app.app,
        Method::POST,
        "/api/coach/question",
        Some(json!({"question": "why is the sky blue?"})),
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert!(body["data"]["answer"].as_str().unwrap().len() > 10);
}

#[tokio::test]
async fn it_empty_question_is_400() {
    let app = spawn_test_app().await;

    let resp = request(
        &app.app,
        Method::POST,
        "/api/coach/question",
        Some(json!({"question": "   "})),
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "EMPTY_QUESTION");
}
