use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use gighub_core::domain::common::CoreError;
use serde_json::json;
use thiserror::Error;

pub mod app_state;
pub mod middleware;
pub mod response;

pub use app_state::AppState;
pub use response::Response;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error")]
    InternalServerError,

    #[error("Startup failed: {0}")]
    StartupError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError | ApiError::StartupError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Conflict(_) => "conflict",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::InternalServerError | ApiError::StartupError(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> AxumResponse {
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (self.status(), body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::GigNotFound { .. }
            | CoreError::GigAlreadyCanceled { .. }
            | CoreError::AttendanceNotFound { .. }
            | CoreError::FollowingNotFound { .. } => ApiError::NotFound(error.to_string()),
            CoreError::NotGigOwner { .. } => ApiError::Forbidden(error.to_string()),
            CoreError::InvalidVenue
            | CoreError::GigDateNotInFuture
            | CoreError::GenreNotFound { .. }
            | CoreError::AttendanceAlreadyExists { .. }
            | CoreError::FollowingAlreadyExists { .. } => ApiError::BadRequest(error.to_string()),
            CoreError::ConstraintViolation { .. } => ApiError::Conflict(error.to_string()),
            CoreError::ServiceUnavailable(_) | CoreError::Unhealthy => {
                ApiError::ServiceUnavailable(error.to_string())
            }
            CoreError::DatabaseError { .. } | CoreError::UnknownError { .. } => {
                tracing::error!("Unexpected failure: {}", error);
                ApiError::InternalServerError
            }
        }
    }
}
