use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `public` is the only text the caller sees; `source` is logged.
    #[error("{public} ({source})")]
    GenerationFailed {
        public: &'static str,
        #[source]
        source: LlmError,
    },
}

impl AppError {
    pub fn generation_failed(public: &'static str) -> impl FnOnce(LlmError) -> Self {
        move |source| AppError::GenerationFailed { public, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::GenerationFailed { public, source } => {
                tracing::error!("Error from OpenAI: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
