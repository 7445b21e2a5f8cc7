//! API error types with IntoResponse
//!
//! Validation failures become a structured 400, missing tasks an empty
//! 404, and store faults an opaque 500 with the real cause only in the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404, empty body)
    NotFound { resource: &'static str, id: i64 },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": e.code(),
                    "message": e.to_string(),
                    "field": e.field()
                })),
            )
                .into_response(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id, "not found");
                StatusCode::NOT_FOUND.into_response()
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn too_short_is_structured_400() {
        let err = ApiError::Validation(ValidationError::TaskNameTooShort { min: 10 });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "error": "TaskNameTooShort",
                "message": "Task must be at least 10 characters long.",
                "field": "TaskName"
            })
        );
    }

    #[tokio::test]
    async fn not_found_is_empty_404() {
        let err = ApiError::NotFound {
            resource: "todo",
            id: 42,
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn database_error_is_opaque_500() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "internal_error");
        assert!(!body["message"].as_str().unwrap().contains("pool"));
    }
}
