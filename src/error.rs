//! API error type with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type of the service. Each variant
//! maps to an HTTP status code; every error response uses the same flat
//! JSON body:
//!
//! ```json
//! { "error": "connection refused" }
//! ```

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ValidationError;

/// Message used when a failure carries no description of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to load cities";

/// JSON error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant          | HTTP Status               |
/// |------------------|---------------------------|
/// | `QueryFailed`    | 500 Internal Server Error |
/// | `NotFound`       | 404 Not Found             |
/// | `Unauthorized`   | 401 Unauthorized          |
/// | `Forbidden`      | 403 Forbidden             |
/// | `InvalidRequest` | 400 Bad Request           |
/// | `Internal`       | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A backend read failed. The message is surfaced verbatim.
    #[error("{0}")]
    QueryFailed(String),

    /// The requested record does not exist or is not visible.
    #[error("{0}")]
    NotFound(String),

    /// The caller has no resolved identity.
    #[error("authentication required")]
    Unauthorized,

    /// The caller's identity lacks the required permission.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Request parameters failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Shorthand for a [`ApiError::NotFound`] naming the record kind and id.
    #[must_use]
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} not found: {id}"))
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::QueryFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the message placed in the response body, substituting
    /// [`FALLBACK_ERROR_MESSAGE`] for blank messages.
    #[must_use]
    pub fn public_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::QueryFailed(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::QueryFailed(err.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorResponse {
            error: self.public_message(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("body is not json");
        };
        (status, value)
    }

    #[tokio::test]
    async fn query_failure_surfaces_message_verbatim() {
        let (status, body) = body_json(ApiError::QueryFailed("connection refused".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "connection refused" }));
    }

    #[tokio::test]
    async fn blank_query_failure_uses_fallback() {
        let (status, body) = body_json(ApiError::QueryFailed("   ".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::not_found("deal", "x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Forbidden("claim".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::InvalidRequest("limit".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_message_names_record() {
        let err = ApiError::not_found("city", "abc");
        assert_eq!(err.public_message(), "city not found: abc");
    }
}
