use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use serde::Serialize;

use crate::constants::VOCABULARY_REVIEW_SIZE;
use crate::lessons::{language, math};
use crate::leveling::engine;
use crate::leveling::types::{Subject, UserProfile};
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::store::operations::users::User;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id/lessons/language", post(start_language_lesson))
        .route("/:user_id/lessons/math", post(start_math_lesson))
        .route("/:user_id/lessons/vocabulary", get(vocabulary_review))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LanguageLessonResponse {
    lesson: language::Lesson,
    difficulty: language::DifficultyBand,
    lessons_remaining_today: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MathLessonResponse {
    exercise: math::MathExercise,
    lessons_remaining_today: u32,
}

fn load_user_and_profile(
    state: &AppState,
    user_id: &str,
) -> Result<(User, UserProfile), AppError> {
    let user = state
        .store()
        .get_user_by_id(user_id)?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    let profile = state
        .store()
        .get_profile(user_id)?
        .ok_or_else(|| AppError::not_found("User profile not found"))?;
    Ok((user, profile))
}

/// Consume one of the user's daily lesson slots, or reject with 429 when the
/// subscription tier's allowance for today is spent.
fn consume_lesson_slot(user: &User, profile: &mut UserProfile) -> Result<u32, AppError> {
    let limit = user.subscription.daily_lesson_limit();
    if !engine::try_consume_daily_lesson(&mut profile.stats, limit, Utc::now()) {
        return Err(AppError::too_many_requests(
            "LESSON_LIMIT_REACHED",
            "Daily lesson limit reached, come back tomorrow",
        ));
    }
    Ok(limit - profile.stats.lessons_today)
}

async fn start_language_lesson(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let lock = state.user_lock(&user_id);
    let _guard = lock.lock().await;

    let (user, mut profile) = load_user_and_profile(&state, &user_id)?;
    let remaining = consume_lesson_slot(&user, &mut profile)?;

    let level = profile.subject(Subject::English).level;
    let lesson = language::generate_lesson(level);
    state.store().save_profile(&profile)?;

    tracing::debug!(user_id = %user_id, level, title = %lesson.title, "Language lesson started");

    Ok(ok(LanguageLessonResponse {
        lesson,
        difficulty: language::DifficultyBand::for_level(level),
        lessons_remaining_today: remaining,
    }))
}

async fn start_math_lesson(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let lock = state.user_lock(&user_id);
    let _guard = lock.lock().await;

    let (user, mut profile) = load_user_and_profile(&state, &user_id)?;
    let remaining = consume_lesson_slot(&user, &mut profile)?;

    let level = profile.subject(Subject::Math).level;
    let exercise = math::generate_exercise(level, &profile.weak_topics);
    state.store().save_profile(&profile)?;

    tracing::debug!(user_id = %user_id, level, topic = %exercise.topic, "Math exercise generated");

    Ok(ok(MathLessonResponse {
        exercise,
        lessons_remaining_today: remaining,
    }))
}

/// Review picks are free: they do not count against the daily lesson limit.
async fn vocabulary_review(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let profile = state
        .store()
        .get_profile(&user_id)?
        .ok_or_else(|| AppError::not_found("User profile not found"))?;

    let unit = profile.subject(Subject::English).current_unit;
    let words = language::generate_vocabulary_review(&unit, VOCABULARY_REVIEW_SIZE);

    Ok(ok(serde_json::json!({
        "unit": unit,
        "words": words,
    })))
}
