//! Error types for pipeline stages

use briefwire_comms::CommsError;
use briefwire_llm::LLMError;

/// Result type for stage entry points
pub type Result<T> = std::result::Result<T, StageError>;

/// Errors crossing a stage boundary
///
/// Every stage entry point returns this instead of panicking; the seam
/// that hosts the stage decides how to render it for remote callers.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// Coordination or remote-call failure
    #[error(transparent)]
    Comms(#[from] CommsError),

    /// LLM call failure
    #[error(transparent)]
    Llm(#[from] LLMError),

    /// Stage input did not have the expected shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl StageError {
    /// Create an invalid payload error
    pub fn invalid_payload<S: Into<String>>(msg: S) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

impl From<StageError> for CommsError {
    fn from(err: StageError) -> Self {
        match err {
            StageError::Comms(e) => e,
            other => CommsError::Operation(other.to_string()),
        }
    }
}
