//! Error handling for the trove HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Body of a failed create. `message` is only present for resources that label their failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateFailure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: String,
}

impl std::fmt::Display for CreateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", message, self.error),
            None => f.write_str(&self.error),
        }
    }
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// A create request the store refused, or whose body could not be read.
    /// Always answered with 400 and a [`CreateFailure`] body.
    #[error("create failed: {0}")]
    CreateFailed(CreateFailure),

    #[error("not found: {message}")]
    NotFound { message: String, code: String },
}

impl AppError {
    /// Create failure answered as `{"error": ...}`
    pub fn create_failed(error: impl ToString) -> Self {
        Self::CreateFailed(CreateFailure {
            message: None,
            error: error.to_string(),
        })
    }

    /// Create failure answered as `{"message": ..., "error": ...}`
    pub fn create_failed_with(message: impl Into<String>, error: impl ToString) -> Self {
        Self::CreateFailed(CreateFailure {
            message: Some(message.into()),
            error: error.to_string(),
        })
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            AppError::CreateFailed(failure) => {
                tracing::warn!(
                    status_code = %StatusCode::BAD_REQUEST.as_u16(),
                    error = %failure.error,
                    "create rejected"
                );
                return (StatusCode::BAD_REQUEST, Json(failure)).into_response();
            }
            AppError::NotFound { message, code } => (StatusCode::NOT_FOUND, code, message),
        };

        let error_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc().to_string();

        tracing::error!(
            error_id = %error_id,
            error_code = %error_code,
            status_code = %status.as_u16(),
            "Request error"
        );

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": message,
                "details": [],
                "trace_id": error_id.to_string(),
                "timestamp": timestamp
            }
        });

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn labelled_create_failure_carries_message_and_error() {
        let response =
            AppError::create_failed_with("Failed to create book", "Book validation failed")
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Failed to create book", "error": "Book validation failed"})
        );
    }

    #[tokio::test]
    async fn bare_create_failure_has_no_message() {
        let response = AppError::create_failed("Product validation failed").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Product validation failed"})
        );
    }

    #[tokio::test]
    async fn not_found_uses_error_envelope() {
        let response = AppError::not_found("Test resource not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "not_found");
        assert_eq!(body["error"]["message"], "Test resource not found");
        assert!(Uuid::parse_str(body["error"]["trace_id"].as_str().unwrap()).is_ok());
        assert!(body["error"]["timestamp"].is_string());
    }
}
