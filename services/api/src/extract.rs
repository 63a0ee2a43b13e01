//! Request extraction: JSON or form-encoded bodies, and numeric path ids

use async_trait::async_trait;
use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{error::ApiError, validation::Validate};

/// Body decoded from `application/json` or `application/x-www-form-urlencoded`
/// and validated before the handler runs.
#[derive(Debug)]
pub struct ValidatedBody<T>(pub T);

fn media_type(req: &Request) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedBody<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match media_type(&req).as_str() {
            "application/json" => {
                let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
                    debug!("Rejected JSON body: {}", e);
                    ApiError::BadRequest(e.body_text())
                })?;
                value
            }
            "application/x-www-form-urlencoded" => {
                let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                    debug!("Rejected form body: {}", e);
                    ApiError::BadRequest(e.body_text())
                })?;
                value
            }
            _ => return Err(ApiError::UnsupportedMediaType),
        };

        value.validate().map_err(ApiError::Validation)?;

        Ok(ValidatedBody(value))
    }
}

/// Numeric `:id` path segment. A non-numeric id is a 400 in the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                debug!("Rejected path id: {}", e);
                ApiError::BadRequest(e.body_text())
            })?;

        Ok(ResourceId(id))
    }
}
