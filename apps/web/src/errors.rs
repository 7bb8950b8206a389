use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::advisor::RequestError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("A request for this panel is already running")]
    Busy,

    #[error("Session store error: {0}")]
    Session(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            // Cause was logged where the error was collapsed.
            AppError::Request(e) => (StatusCode::BAD_GATEWAY, "REQUEST_ERROR", e.to_string()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Sign in to continue to your dashboard".to_string(),
            ),
            AppError::Busy => (StatusCode::CONFLICT, "BUSY", self.to_string()),
            AppError::Session(e) => {
                tracing::error!("Session store error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SESSION_ERROR",
                    "The session could not be saved".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::Operation;
    use crate::llm_client::LlmError;

    #[test]
    fn test_request_error_status_and_generic_message() {
        let err = AppError::from(RequestError {
            operation: Operation::Search,
            cause: LlmError::EmptyContent,
        });
        assert_eq!(
            err.to_string(),
            "Failed to get information from Google Search. Please check your API key and try again."
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Busy.into_response().status(), StatusCode::CONFLICT);
    }
}
