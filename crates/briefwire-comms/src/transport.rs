//! Agent transport and session traits

use async_trait::async_trait;
use serde_json::Value;

use crate::{AgentAddress, Result};

/// Transport layer for reaching agents' operations
///
/// Implementations handle HOW an agent is reached. Callers use this
/// interface without knowing the underlying mechanism.
#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// Open a session to an agent
    async fn connect(&self, agent: &AgentAddress) -> Result<Box<dyn AgentSession>>;

    /// Get transport name
    fn name(&self) -> &str;
}

/// A request/response session against a single agent
///
/// Sessions are exclusively owned by the call that created them and must
/// be closed before the call returns. The expected lifecycle is
/// `connect -> initialize -> invoke -> close`.
#[async_trait]
pub trait AgentSession: Send {
    /// Perform the session handshake
    async fn initialize(&mut self) -> Result<()>;

    /// Invoke a named operation with JSON arguments
    async fn invoke(&mut self, operation: &str, args: Value) -> Result<Value>;

    /// Tear the session down
    async fn close(&mut self) -> Result<()>;
}
