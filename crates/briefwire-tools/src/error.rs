//! Error types for data operations

use briefwire_comms::CommsError;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors that can occur while fetching external data
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Required API key is not set
    #[error("Missing API key: {0} is not set")]
    MissingApiKey(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream API rejected the request
    #[error("{0}")]
    Api(String),

    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create an API error
    pub fn api<S: Into<String>>(msg: S) -> Self {
        Self::Api(msg.into())
    }

    /// Create an invalid parameters error
    pub fn invalid_params<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameters(msg.into())
    }
}

impl From<ToolError> for CommsError {
    fn from(err: ToolError) -> Self {
        CommsError::Operation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_message() {
        let err = ToolError::MissingApiKey("NEWSAPI_KEY".to_string());
        assert_eq!(err.to_string(), "Missing API key: NEWSAPI_KEY is not set");
    }

    #[test]
    fn test_api_error_passthrough_message() {
        let err = ToolError::api("City 'Atlantis' not found (404 Not Found).");
        assert_eq!(err.to_string(), "City 'Atlantis' not found (404 Not Found).");
    }

    #[test]
    fn test_conversion_to_comms_error() {
        let err: CommsError = ToolError::invalid_params("missing field 'topic'").into();
        assert!(matches!(err, CommsError::Operation(_)));
    }
}
