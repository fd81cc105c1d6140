use axum::extract::{Path, State};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::state::AppState;

/// Routes nested under `/users`.
pub fn user_router() -> Router<AppState> {
    Router::new().route("/:user_id/coach/daily-plan", post(daily_plan))
}

/// Routes nested under `/coach`.
pub fn router() -> Router<AppState> {
    Router::new().route("/question", post(ask_question))
}

async fn daily_plan(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let profile = state
        .store()
        .get_profile(&user_id)?
        .ok_or_else(|| AppError::not_found("User profile not found"))?;

    let plan = state.coach().daily_plan(&profile).await?;
    Ok(ok(plan))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct QuestionRequest {
    question: String,
}

async fn ask_question(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<QuestionRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(AppError::bad_request(
            "EMPTY_QUESTION",
            "Question must not be empty",
        ));
    }

    let answer = state.coach().answer_question(question).await?;
    Ok(ok(serde_json::json!({ "answer": answer })))
}
