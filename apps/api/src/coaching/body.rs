//! Request body extraction for the coaching routes.
//!
//! Mirrors what the browser client has always been able to send:
//! - no `application/json` content type, or an empty body: empty request
//! - a JSON object: fields read by name
//! - a JSON array: empty request (fields are never read by position)
//! - malformed JSON or a bare string/number/bool/null: 400

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;

pub const MALFORMED_BODY: &str = "Malformed JSON body.";

/// Body extractor that falls back to `T::default()` instead of rejecting.
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        parse_body(is_json, &bytes)
            .map(LenientJson)
            .map_err(IntoResponse::into_response)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn parse_body<T: DeserializeOwned + Default>(is_json: bool, bytes: &[u8]) -> Result<T, AppError> {
    if !is_json || bytes.is_empty() {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        debug!("Rejecting malformed JSON body: {e}");
        AppError::InvalidInput(MALFORMED_BODY.to_string())
    })?;

    match value {
        Value::Object(map) => Ok(serde_json::from_value(Value::Object(map)).unwrap_or_else(|e| {
            debug!("Treating unreadable request object as empty: {e}");
            T::default()
        })),
        Value::Array(_) => Ok(T::default()),
        _ => Err(AppError::InvalidInput(MALFORMED_BODY.to_string())),
    }
}
