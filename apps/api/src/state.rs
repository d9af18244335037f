use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. The pipeline and renderer themselves are stateless —
/// concurrent requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    #[allow(dead_code)]
    pub config: Config,
}
