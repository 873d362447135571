use std::sync::Arc;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generator. `LlmClient` in production, a stub in tests.
    pub generator: Arc<dyn TextGenerator>,
}
