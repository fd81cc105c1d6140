use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;

use crate::extractors::JsonBody;
use crate::leveling::engine;
use crate::leveling::types::{ProgressUpdate, StatsUpdate, Subject};
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id/profile", get(get_profile_summary))
        .route("/:user_id/stats", get(get_stats).post(update_stats))
        .route("/:user_id/progress/:subject", post(update_progress))
}

async fn get_profile_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let user = state
        .store()
        .get_user_by_id(&user_id)?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    let profile = state
        .store()
        .get_profile(&user_id)?
        .ok_or_else(|| AppError::not_found("User profile not found"))?;

    Ok(ok(engine::build_summary(&profile, &user.username)))
}

async fn get_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let profile = state
        .store()
        .get_profile(&user_id)?
        .ok_or_else(|| AppError::not_found("User profile not found"))?;
    Ok(ok(profile))
}

async fn update_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    JsonBody(update): JsonBody<StatsUpdate>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let lock = state.user_lock(&user_id);
    let _guard = lock.lock().await;

    let mut profile = state
        .store()
        .get_profile(&user_id)?
        .ok_or_else(|| AppError::not_found("User profile not found"))?;

    engine::apply_stats_update(&mut profile.stats, &update);
    state.store().save_profile(&profile)?;

    Ok(ok(profile.stats))
}

async fn update_progress(
    State(state): State<AppState>,
    Path((user_id, subject)): Path<(String, String)>,
    JsonBody(update): JsonBody<ProgressUpdate>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let subject: Subject = subject
        .parse()
        .map_err(|_| AppError::bad_request("INVALID_SUBJECT", "Unknown subject"))?;

    let lock = state.user_lock(&user_id);
    let _guard = lock.lock().await;

    let mut profile = state
        .store()
        .get_profile(&user_id)?
        .ok_or_else(|| AppError::not_found("User profile not found"))?;

    engine::apply_progress_update(&mut profile, subject, &update)?;
    state.store().save_profile(&profile)?;

    Ok(ok(profile.subject(subject)))
}
