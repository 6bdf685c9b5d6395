//! Client configuration.
//!
//! Everything here has a sensible default so an empty document (`{}`) is a
//! valid configuration pointing at a locally running analysis service.

use serde::{Deserialize, Serialize};
use shared_types::{AnalyzeRequest, Persona};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReviewConfig {
    /// Base URL of the analysis service. Empty means same origin.
    pub api_base: String,
    /// Persona sent with each request until the user switches.
    pub persona: Persona,
    /// Free-form options forwarded verbatim when non-empty.
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            persona: Persona::default(),
            options: serde_json::Map::new(),
        }
    }
}

impl ReviewConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base.trim();
        if base.is_empty() || base.starts_with("http://") || base.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidApiBase(self.api_base.clone()))
        }
    }

    /// Join the base URL and an endpoint path without doubling the slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build an analyze request carrying the configured options.
    pub fn request(&self, prompt: impl Into<String>, persona: Persona) -> AnalyzeRequest {
        AnalyzeRequest {
            prompt: prompt.into(),
            persona: Some(persona),
            options: (!self.options.is_empty()).then(|| self.options.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ReviewConfig::from_json("{}").unwrap();
        assert_eq!(config, ReviewConfig::default());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.persona, Persona::Professor);
    }

    #[test]
    fn test_rejects_non_http_base() {
        let err = ReviewConfig::from_json(r#"{"api_base": "ftp://example.com"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiBase(_)));
    }

    #[test]
    fn test_endpoint_joins_without_duplicate_slash() {
        let config = ReviewConfig::default().with_api_base("http://localhost:8000/");
        assert_eq!(config.endpoint("/api/analyze"), "http://localhost:8000/api/analyze");

        let same_origin = ReviewConfig::default().with_api_base("");
        assert_eq!(same_origin.endpoint("/health"), "/health");
    }

    #[test]
    fn test_request_forwards_options_only_when_present() {
        let config = ReviewConfig::default();
        assert!(config.request("hi", Persona::Guardian).options.is_none());

        let config = ReviewConfig::from_json(r#"{"options": {"strict": true}}"#).unwrap();
        let request = config.request("hi", Persona::Guardian);
        assert_eq!(request.persona, Some(Persona::Guardian));
        assert_eq!(request.options.unwrap()["strict"], true);
    }
}
