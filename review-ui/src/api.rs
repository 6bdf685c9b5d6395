use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use review_core::client::{ANALYZE_PATH, CHAT_PATH, HEALTH_PATH};
use review_core::config::DEFAULT_API_BASE;
use review_core::{AnalysisService, ReviewConfig, ServiceError};
use serde::de::DeserializeOwned;
use shared_types::{AnalysisResult, AnalyzeRequest, ChatRequest, ChatResponse, HealthResponse};
use std::sync::OnceLock;

/// Build-time override, e.g. `PROMPT_REVIEW_API_BASE=https://api.example.com dx build`
const API_BASE_OVERRIDE: Option<&str> = option_env!("PROMPT_REVIEW_API_BASE");

/// Pick the analysis service base URL
/// - Explicit build-time override wins
/// - In development (localhost): use the analysis service on port 8000
/// - In production: use same origin
fn resolve_api_base(override_base: Option<&str>, hostname: &str) -> String {
    if let Some(base) = override_base.map(str::trim).filter(|b| !b.is_empty()) {
        return base.to_string();
    }

    if hostname == "localhost" || hostname == "127.0.0.1" {
        DEFAULT_API_BASE.to_string()
    } else {
        "".to_string()
    }
}

fn get_api_base() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();

    resolve_api_base(API_BASE_OVERRIDE, &hostname)
}

/// Lazy-static equivalent for WASM - computed at first use
static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Get the cached API base URL
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(get_api_base).as_str()
}

/// Dashboard configuration for the current page. An invalid override falls
/// back to same origin.
pub fn browser_config() -> ReviewConfig {
    let config = ReviewConfig::default().with_api_base(api_base());
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            dioxus_logger::tracing::warn!("Ignoring API base override: {}", e);
            config.with_api_base("")
        }
    }
}

// ============================================================================
// HTTP transport
// ============================================================================

/// `AnalysisService` over `fetch`, one request per call.
#[derive(Debug, Clone)]
pub struct HttpAnalysisService {
    config: ReviewConfig,
}

impl HttpAnalysisService {
    pub fn new(config: ReviewConfig) -> Self {
        Self { config }
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &AnalyzeRequest,
    ) -> Result<T, ServiceError> {
        let url = self.config.endpoint(path);

        let response = Request::post(&url)
            .json(body)
            .map_err(|e| ServiceError::Transport(format!("Failed to serialize request: {e}")))?
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    if !response.ok() {
        return Err(ServiceError::Status {
            status: response.status(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult, ServiceError> {
        self.post(ANALYZE_PATH, &request).await
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ServiceError> {
        self.post(CHAT_PATH, &request).await
    }

    async fn health(&self) -> Result<HealthResponse, ServiceError> {
        let url = self.config.endpoint(HEALTH_PATH);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        decode(response).await
    }
}
