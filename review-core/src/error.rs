use thiserror::Error;

/// Failure talking to the analysis service.
///
/// The `Display` form is what the user sees in the error panel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP error: {status}")]
    Status { status: u16 },

    #[error("Failed to parse JSON: {0}")]
    Decode(String),
}

/// `RewriteBridge::apply` was called while no input owner was registered.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("no active input to receive the rewrite")]
pub struct MissingRewriteTarget;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api base `{0}`: expected an http:// or https:// URL, or empty for same origin")]
    InvalidApiBase(String),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_messages_are_user_facing() {
        assert_eq!(
            ServiceError::Status { status: 502 }.to_string(),
            "HTTP error: 502"
        );
        assert_eq!(
            ServiceError::Transport("connection refused".into()).to_string(),
            "Request failed: connection refused"
        );
    }
}
