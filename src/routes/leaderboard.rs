use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LEADERBOARD_SIZE;
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(leaderboard))
}

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    limit: Option<usize>,
}

impl LeaderboardQuery {
    fn limit(&self, max: usize) -> usize {
        self.limit.unwrap_or(DEFAULT_LEADERBOARD_SIZE).clamp(1, max)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardEntry {
    rank: usize,
    user_id: String,
    username: String,
    global_level: u32,
    total_xp: u64,
}

/// Top users by total XP. Read-only aggregation over the profile tree; the
/// username comes from the registry, falling back to the raw id for profiles
/// whose user record is missing.
async fn leaderboard(
    State(state): State<AppState>,
    Query(q): Query<LeaderboardQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let limit = q.limit(state.config().pagination.max_page_size as usize);
    let top = state.store().top_profiles_by_xp(limit)?;

    let mut entries = Vec::with_capacity(top.len());
    for (idx, profile) in top.iter().enumerate() {
        let username = state
            .store()
            .get_user_by_id(&profile.user_id)?
            .map(|u| u.username)
            .unwrap_or_else(|| profile.user_id.clone());

        entries.push(LeaderboardEntry {
            rank: idx + 1,
            user_id: profile.user_id.clone(),
            username,
            global_level: profile.stats.global_level,
            total_xp: profile.stats.total_xp,
        });
    }

    Ok(ok(entries))
}
