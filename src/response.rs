use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub trace_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub is_operational: bool,
}

impl AppError {
    pub fn bad_request(code: &str, message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: code.to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND".to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            code: code.to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn too_many_requests(code: &str, message: &str) -> Self {
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            code: code.to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn service_unavailable(code: &str, message: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            code: code.to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_ERROR".to_string(),
            message: message.to_string(),
            is_operational: false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let exposed_message = if self.is_operational {
            self.message.clone()
        } else {
            "Internal server error".to_string()
        };

        if self.is_operational {
            tracing::warn!(status = %self.status, code = %self.code, error = %self.message, "API error");
        } else {
            tracing::error!(status = %self.status, code = %self.code, error = %self.message, "Internal API error");
        }

        (
            self.status,
            Json(ErrorBody {
                success: false,
                code: self.code,
                message: exposed_message,
                trace_id: None,
            }),
        )
            .into_response()
    }
}

// 安全说明：StoreError 转换映射：
// - Validation -> 400（用户输入问题，可安全暴露消息）
// - NotFound  -> 404，Conflict -> 409
// - 其他错误 -> 500（is_operational=false，IntoResponse 中会替换为通用消息）
impl From<crate::store::StoreError> for AppError {
    fn from(value: crate::store::StoreError) -> Self {
        match &value {
            crate::store::StoreError::Validation(msg) => {
                AppError::bad_request("VALIDATION_ERROR", msg)
            }
            crate::store::StoreError::NotFound { entity, key } => {
                AppError::not_found(&format!("{entity} not found: {key}"))
            }
            crate::store::StoreError::Conflict { entity, key } => {
                AppError::conflict("CONFLICT", &format!("{entity} already exists: {key}"))
            }
            _ => AppError::internal(&value.to_string()),
        }
    }
}

impl From<crate::leveling::types::LevelingError> for AppError {
    fn from(value: crate::leveling::types::LevelingError) -> Self {
        match &value {
            crate::leveling::types::LevelingError::InvalidArgument(msg) => {
                AppError::bad_request("INVALID_ARGUMENT", msg)
            }
        }
    }
}

impl From<crate::services::coach::CoachError> for AppError {
    fn from(value: crate::services::coach::CoachError) -> Self {
        use crate::services::coach::CoachError;
        match &value {
            CoachError::Disabled => {
                AppError::service_unavailable("COACH_DISABLED", "AI coach is not enabled")
            }
            CoachError::Timeout => {
                AppError::service_unavailable("COACH_TIMEOUT", "AI coach request timed out")
            }
            CoachError::Network(_) => {
                AppError::service_unavailable("COACH_UNAVAILABLE", "AI coach is unreachable")
            }
            CoachError::Api { .. } => AppError::internal(&value.to_string()),
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data,
        }),
    )
}

pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            data,
        }),
    )
}
