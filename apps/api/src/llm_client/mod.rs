//! LLM Client — the single point of entry for all OpenAI calls in the backend.
//!
//! Handlers never talk to the Responses API directly: they receive an
//! `Arc<dyn TextGenerator>` through `AppState`, which is an `LlmClient` in
//! production and a stub in tests.
//!
//! Model: gpt-5.1-mini (hardcoded, not configurable)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The model used for all generation calls.
pub const MODEL: &str = "gpt-5.1-mini";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that can turn a rendered prompt into generated text.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

impl LlmResponse {
    /// Text of the first content part of the first output item.
    pub fn text(&self) -> Option<&str> {
        self.output
            .first()?
            .content
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Thin wrapper over the OpenAI Responses API.
/// One request per call: no retries, no streaming, client-default timeouts.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    /// Makes a raw call to the Responses API, returning the full response object.
    pub async fn call(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let request_body = ResponsesRequest {
            model: MODEL,
            input: vec![InputMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.responses_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        response
            .text()
            .map(str::to_owned)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    #[derive(Clone, Default)]
    struct Captured {
        body: Arc<Mutex<Option<Value>>>,
        auth: Arc<Mutex<Option<String>>>,
    }

    /// Serves `app` on an ephemeral local port and returns its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fixed_upstream(status: StatusCode, body: &'static str) -> Router {
        Router::new().route("/responses", post(move || async move { (status, body) }))
    }

    fn client_for(base_url: String) -> LlmClient {
        LlmClient::new("test-key".to_string(), base_url).unwrap()
    }

    #[test]
    fn test_text_reads_first_part_of_first_item() {
        let response: LlmResponse = serde_json::from_value(json!({
            "output": [
                {"content": [{"type": "output_text", "text": "first"}, {"text": "second"}]},
                {"content": [{"text": "third"}]}
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), Some("first"));
    }

    #[test]
    fn test_text_does_not_search_past_first_item() {
        let response: LlmResponse = serde_json::from_value(json!({
            "output": [
                {"type": "reasoning", "summary": []},
                {"content": [{"text": "later"}]}
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_text_missing_output_is_none() {
        let response: LlmResponse = serde_json::from_value(json!({"id": "resp_1"})).unwrap();
        assert!(response.output.is_empty());
        assert_eq!(response.text(), None);
    }

    #[tokio::test]
    async fn test_generate_sends_single_user_turn() {
        let captured = Captured::default();
        let app = Router::new()
            .route(
                "/responses",
                post(
                    |State(captured): State<Captured>, headers: HeaderMap, Json(body): Json<Value>| async move {
                        *captured.auth.lock().unwrap() = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_owned);
                        *captured.body.lock().unwrap() = Some(body);
                        Json(json!({
                            "output": [{"content": [{"type": "output_text", "text": "1. Read the chapter"}]}],
                            "usage": {"input_tokens": 12, "output_tokens": 5}
                        }))
                    },
                ),
            )
            .with_state(captured.clone());

        let llm = client_for(spawn_upstream(app).await);
        let text = llm.generate("Plan my week").await.unwrap();
        assert_eq!(text, "1. Read the chapter");

        assert_eq!(
            captured.auth.lock().unwrap().as_deref(),
            Some("Bearer test-key")
        );
        let body = captured.body.lock().unwrap().clone().unwrap();
        assert_eq!(
            body,
            json!({
                "model": MODEL,
                "input": [{"role": "user", "content": "Plan my week"}]
            })
        );
    }

    #[tokio::test]
    async fn test_error_status_extracts_upstream_message() {
        let upstream = fixed_upstream(
            StatusCode::UNAUTHORIZED,
            r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#,
        );
        let llm = client_for(spawn_upstream(upstream).await);

        match llm.generate("hello").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_falls_back_to_raw_body() {
        let upstream = fixed_upstream(StatusCode::BAD_GATEWAY, "upstream exploded");
        let llm = client_for(spawn_upstream(upstream).await);

        match llm.generate("hello").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_output_is_empty_content() {
        let upstream = fixed_upstream(StatusCode::OK, r#"{"output": []}"#);
        let llm = client_for(spawn_upstream(upstream).await);

        assert!(matches!(
            llm.generate("hello").await,
            Err(LlmError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let upstream = fixed_upstream(StatusCode::OK, "not json at all");
        let llm = client_for(spawn_upstream(upstream).await);

        assert!(matches!(llm.generate("hello").await, Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let llm = client_for(format!("http://{addr}"));
        assert!(matches!(llm.generate("hello").await, Err(LlmError::Http(_))));
    }
}
