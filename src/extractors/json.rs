//! Request bodies that reject with `AppError` instead of axum's plain-text rejections.
//!
//! Unlike `axum::Json`, the `Content-Type` header is not checked and type mismatches are
//! 400s rather than 422s. A body over the configured limit stays a 413.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Body decoded as JSON into `T`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

/// Raw buffered body, for handlers that decode it later.
#[derive(Debug, Clone)]
pub struct BodyBytes(pub Bytes);

#[async_trait]
impl<S> FromRequest<S> for BodyBytes
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Bytes::from_request(req, state)
            .await
            .map(BodyBytes)
            .map_err(buffer_error)
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let BodyBytes(bytes) = BodyBytes::from_request(req, state).await?;
        parse_body(&bytes).map(JsonBody)
    }
}

fn buffer_error(e: BytesRejection) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

/// Decode a raw body, mapping serde errors to `AppError::BadRequest` with serde's message.
/// A bare `null` body binds like `{}`.
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let value = match value {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(e.to_string()))
}
