//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use darkscan_core::{DetectorError, ErrorKind};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Caller input errors
    ValidationError(String),
    FetchFailed(String),
    NoContent(String),

    // Artifacts/resources not usable
    ServiceUnavailable(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::FetchFailed(reason) => {
                tracing::warn!("Page fetch failed: {}", reason);
                (StatusCode::BAD_REQUEST, "Failed to fetch URL content")
            }
            AppError::NoContent(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Detection service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Detection service unavailable")
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "detail": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<DetectorError> for AppError {
    fn from(err: DetectorError) -> Self {
        match err.kind() {
            ErrorKind::BadInput => match err {
                DetectorError::NoContent(msg) => AppError::NoContent(msg),
                other => AppError::ValidationError(
                    other.input_message().map(str::to_string).unwrap_or_else(|| other.to_string()),
                ),
            },
            ErrorKind::Unavailable => AppError::ServiceUnavailable(err.to_string()),
            ErrorKind::Unexpected => AppError::InternalError(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::ValidationError(message)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("detection task failed: {}", err))
    }
}

impl From<crate::fetcher::FetchError> for AppError {
    fn from(err: crate::fetcher::FetchError) -> Self {
        AppError::FetchFailed(err.to_string())
    }
}
