use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::leveling::types::UserProfile;
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::store::operations::users::{Subscription, User};
use crate::store::StoreError;
use crate::validation::validate_username;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/:user_id", get(get_user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    id: Option<String>,
    username: String,
    first_name: Option<String>,
    language: Option<String>,
}

/// First contact with a previously-unseen user: create the registry record
/// and a fresh profile with all subjects at level 1.
async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let username = req.username.trim();
    if let Err(msg) = validate_username(username) {
        return Err(AppError::bad_request("USER_INVALID_USERNAME", msg));
    }

    let user_id = req
        .id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let now = Utc::now();

    let user = User {
        id: user_id.clone(),
        username: username.to_string(),
        first_name: req.first_name.unwrap_or_default(),
        language: req
            .language
            .unwrap_or_else(|| crate::constants::DEFAULT_LANGUAGE.to_string()),
        subscription: Subscription::Free,
        created_at: now,
    };

    if let Err(e) = state.store().create_user(&user) {
        return Err(match e {
            StoreError::Conflict { .. } => {
                AppError::conflict("USER_EXISTS", "User is already registered")
            }
            other => other.into(),
        });
    }

    let profile = UserProfile::new(&user_id, now);
    state.store().create_profile(&profile)?;

    tracing::info!(user_id = %user_id, "User registered");

    Ok(created(serde_json::json!({
        "user": user,
        "profile": profile,
    })))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let user = state
        .store()
        .get_user_by_id(&user_id)?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(user))
}
