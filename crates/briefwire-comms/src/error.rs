//! Error types for agent communication

use briefwire_core::CoreError;
use std::time::Duration;

/// Result type for communication operations
pub type Result<T> = std::result::Result<T, CommsError>;

/// Errors in agent communication
#[derive(Debug, thiserror::Error)]
pub enum CommsError {
    /// Agent not found
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Operation not found on the target agent
    #[error("Operation not found: {0}")]
    OperationNotFound(String),

    /// Operation already registered
    #[error("Operation already registered: {0}")]
    AlreadyRegistered(String),

    /// Operation execution failed
    #[error("Operation failed: {0}")]
    Operation(String),

    /// Timed out waiting for a correlated envelope
    #[error("Timed out waiting for task {task_id} after {waited:?}")]
    CorrelationTimeout { task_id: String, waited: Duration },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Other error
    #[error("{0}")]
    Other(String),

    /// Generic error from briefwire-core
    #[error(transparent)]
    CoreError(#[from] CoreError),
}

impl CommsError {
    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an operation failure error
    pub fn operation<S: Into<String>>(msg: S) -> Self {
        Self::Operation(msg.into())
    }

    /// Create a generic other error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CommsError::transport("connection refused");
        assert!(matches!(err, CommsError::Transport(_)));
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_correlation_timeout_display() {
        let err = CommsError::CorrelationTimeout {
            task_id: "task-1".to_string(),
            waited: Duration::from_secs(5),
        };
        assert!(err.to_string().contains("task-1"));
    }
}
