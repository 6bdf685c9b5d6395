//! Transport seam to the analysis service.
//!
//! Implementations are thin: one HTTP round trip per call, no caching, no
//! retry. The browser implementation lives in `review-ui`; tests substitute
//! scripted fakes.

use async_trait::async_trait;
use shared_types::{AnalysisResult, AnalyzeRequest, ChatRequest, ChatResponse, HealthResponse};

use crate::error::ServiceError;

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const CHAT_PATH: &str = "/api/chat";
pub const HEALTH_PATH: &str = "/health";

/// Futures are `!Send`: everything runs on the single UI thread.
#[async_trait(?Send)]
pub trait AnalysisService {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult, ServiceError>;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ServiceError>;

    async fn health(&self) -> Result<HealthResponse, ServiceError>;
}
