pub mod activities;
pub mod coach;
pub mod health;
pub mod leaderboard;
pub mod lessons;
pub mod profile;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::middleware::request_id;
use crate::state::AppState;

/// Maximum request body size: 256 KiB.
const MAX_BODY_SIZE: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let user_routes = users::router()
        .merge(profile::router())
        .merge(activities::router())
        .merge(lessons::router())
        .merge(coach::user_router());

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/leaderboard", leaderboard::router())
        .nest("/coach", coach::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::router())
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}
