//! Custom error types for the API service

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::error;

use crate::{jwt::JwtError, password::PasswordError};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Login email/password mismatch
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration collided with an existing user, keyed by field
    #[error("Duplicate fields: {0:?}")]
    Conflict(BTreeMap<String, String>),

    /// Authenticated but not the owner of the resource
    #[error("Forbidden")]
    Forbidden,

    /// Resource does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Request body failed validation, keyed by field
    #[error("Validation failed: {0:?}")]
    Validation(BTreeMap<String, String>),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body is neither JSON nor form-encoded
    #[error("Unsupported content type")]
    UnsupportedMediaType,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) | ApiError::Validation(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InternalServerError | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn errors(self) -> Value {
        match self {
            ApiError::Conflict(fields) | ApiError::Validation(fields) => json!(fields),
            ApiError::Forbidden => json!({ "message": "You don't have permission" }),
            ApiError::NotFound(resource) => json!({ "message": format!("{} not found", resource) }),
            ApiError::BadRequest(msg) => json!(msg),
            ApiError::UnsupportedMediaType => json!(
                "Request content type must be either 'application/json' or 'application/x-www-form-urlencoded'"
            ),
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                json!("Internal server error")
            }
            other => json!(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = Json(json!({
            "code": status.as_u16(),
            "status": status.canonical_reason().unwrap_or_default(),
            "errors": self.errors(),
        }));

        (status, body).into_response()
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidToken => ApiError::Unauthorized,
            other => {
                error!("JWT error: {}", other);
                ApiError::InternalServerError
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        error!("Password hashing error: {}", err);
        ApiError::InternalServerError
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_forbidden_envelope() {
        let (status, body) = render(ApiError::Forbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], 403);
        assert_eq!(body["status"], "Forbidden");
        assert_eq!(body["errors"]["message"], "You don't have permission");
    }

    #[tokio::test]
    async fn test_validation_envelope_lists_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("age".to_string(), "Age must be greater than 8".to_string());
        let (status, body) = render(ApiError::Validation(fields)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["age"], "Age must be greater than 8");
    }

    #[tokio::test]
    async fn test_database_errors_are_not_leaked() {
        let err = ApiError::Database(common::error::DatabaseError::Configuration(
            "secret detail".to_string(),
        ));
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errors"], "Internal server error");
    }

    #[test]
    fn test_invalid_token_maps_to_unauthorized() {
        assert!(matches!(
            ApiError::from(JwtError::InvalidToken),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(JwtError::Clock),
            ApiError::InternalServerError
        ));
    }
}
