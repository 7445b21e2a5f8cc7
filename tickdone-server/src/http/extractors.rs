//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract a numeric task id from the path.
///
/// Non-numeric ids are rejected with the same structured 400 body as
/// other validation failures, before any store access.
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "id",
                    reason: "missing path parameter",
                })
            })?;

        let id = raw.parse::<i64>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
        })?;

        Ok(Self(id))
    }
}
