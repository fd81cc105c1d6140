mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::app::spawn_test_app;
use common::http::{assert_status_ok_json, request, response_json};

/// End-to-end pass over the public surface: register, score activities,
/// record progress, take lessons, then read the aggregated views.
#[tokio::test]
async fn it_full_learner_journey() {
    let app = spawn_test_app().await;

    // Register
    let resp = request(
        &app.app,
        Method::POST,
        "/api/users",
        Some(json!({"id": "tg-7", "username": "ana", "firstName": "Ana"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // A hard math activity and a perfect lesson
    let resp = request(
        &app.app,
        Method::POST,
        "/api/users/tg-7/activities",
        Some(json!({"activityKind": "hard", "subject": "math"})),
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["award"]["totalAwarded"], 50);

    let resp = request(
        &app.app,
        Method::POST,
        "/api/users/tg-7/activities",
        Some(json!({"activityKind": "perfectLesson", "subject": "math"})),
    )
    .await;
    let (_, _, body) = response_json(resp).await;
    assert_eq!(body["data"]["totalXp"], 65);

    // Mastery and a completed unit for math
    let resp = request(
        &app.app,
        Method::POST,
        "/api/users/tg-7/progress/math",
        Some(json!({"masteryPercentage": 45.0, "completedItem": "arithmetic-1"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Study time
    let resp = request(
        &app.app,
        Method::POST,
        "/api/users/tg-7/stats",
        Some(json!({"addLearningMinutes": 20})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // A language lesson consumes one daily slot
    let resp = request(&app.app, Method::POST, "/api/users/tg-7/lessons/language", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["lessonsRemainingToday"], 4);

    // Leaderboard has our single learner on top
    let resp = request(&app.app, Method::GET, "/api/leaderboard/", None).await;
    let (_, _, body) = response_json(resp).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["username"], "ana");
    assert_eq!(entries[0]["totalXp"], 65);

    // Profile summary aggregates everything above
    let resp = request(&app.app, Method::GET, "/api/users/tg-7/profile", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["totalXp"], 65);
    assert_eq!(body["data"]["completedUnits"], 1);
    assert_eq!(body["data"]["learningTimeMinutes"], 20);
    assert_eq!(body["data"]["currentStreak"], 1);
    assert_eq!(body["data"]["masteryPercentage"], 15.0);

    // The coach can build a plan from the profile
    let resp = request(
        &app.app,
        Method::POST,
        "/api/users/tg-7/coach/daily-plan",
        None,
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["estimatedTimeMinutes"], 30);
}
