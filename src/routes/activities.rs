use axum::extract::{Path, State};
use axum::routing::post;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::leveling::engine;
use crate::leveling::types::{ActivityKind, AwardResult, Subject};
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:user_id/activities", post(report_activity))
}

/// Base XP per activity type. The table lives here with the reporting layer;
/// the leveling engine only sees the resolved amount.
fn base_xp(kind: ActivityKind) -> i64 {
    match kind {
        ActivityKind::Easy => 10,
        ActivityKind::Medium => 25,
        ActivityKind::Hard => 50,
        ActivityKind::PerfectLesson => 15,
        ActivityKind::StreakBonus => 5,
        ActivityKind::PhotoSolve => 25,
        ActivityKind::SpeakingPractice => 15,
        ActivityKind::CodingChallenge => 30,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ReportActivityRequest {
    activity_kind: ActivityKind,
    subject: Option<Subject>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportActivityResponse {
    award: AwardResult,
    current_streak: u32,
    longest_streak: u32,
    total_xp: u64,
}

/// Score a completed activity: roll the streak for today, award base + streak
/// bonus XP, and record a level achievement when the global level moves.
async fn report_activity(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    JsonBody(req): JsonBody<ReportActivityRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let lock = state.user_lock(&user_id);
    let _guard = lock.lock().await;

    let mut profile = state
        .store()
        .get_profile(&user_id)?
        .ok_or_else(|| AppError::not_found("User profile not found"))?;

    let now = Utc::now();
    engine::touch_streak(&mut profile.stats, now);

    let award = engine::award_xp(&mut profile, base_xp(req.activity_kind), req.activity_kind, req.subject)?;

    if award.leveled_up {
        profile
            .achievements
            .push(format!("Reached level {}", award.new_level));
        tracing::info!(
            user_id = %user_id,
            previous_level = award.previous_level,
            new_level = award.new_level,
            "Level up"
        );
    }

    state.store().save_profile(&profile)?;

    Ok(ok(ReportActivityResponse {
        award,
        current_streak: profile.stats.current_streak,
        longest_streak: profile.stats.longest_streak,
        total_xp: profile.stats.total_xp,
    }))
}
