//! In-process transport dispatching to local operation registries

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    AgentAddress, AgentSession, AgentTransport, CommsError, OperationRegistry, Result,
};

/// In-process transport
///
/// Dispatches invocations directly to registries registered under agent
/// ids in the same process. Used by the server to let co-hosted stages
/// call each other, and by tests.
#[derive(Clone)]
pub struct InProcessTransport {
    /// Agent registries (agent_id -> operations)
    agents: Arc<DashMap<String, OperationRegistry>>,
}

impl InProcessTransport {
    pub fn new() -> Self {
        Self {
            agents: Arc::new(DashMap::new()),
        }
    }

    /// Register an agent's operations under an id
    pub fn register_agent(&self, agent_id: &str, registry: OperationRegistry) {
        self.agents.insert(agent_id.to_string(), registry);
        tracing::debug!("Registered in-process agent: {}", agent_id);
    }
}

impl Default for InProcessTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentTransport for InProcessTransport {
    async fn connect(&self, agent: &AgentAddress) -> Result<Box<dyn AgentSession>> {
        let registry = self
            .agents
            .get(&agent.id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CommsError::AgentNotFound(agent.id.clone()))?;

        Ok(Box::new(InProcessSession {
            agent_id: agent.id.clone(),
            registry,
            initialized: false,
        }))
    }

    fn name(&self) -> &str {
        "in_process"
    }
}

/// Session against a local registry
pub struct InProcessSession {
    agent_id: String,
    registry: OperationRegistry,
    initialized: bool,
}

#[async_trait]
impl AgentSession for InProcessSession {
    async fn initialize(&mut self) -> Result<()> {
        self.initialized = true;
        tracing::debug!("Initialized in-process session to {}", self.agent_id);
        Ok(())
    }

    async fn invoke(&mut self, operation: &str, args: Value) -> Result<Value> {
        if !self.initialized {
            return Err(CommsError::transport("session not initialized"));
        }
        self.registry.invoke(operation, args).await
    }

    async fn close(&mut self) -> Result<()> {
        self.initialized = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Operation, OperationSchema};

    struct PingOperation;

    #[async_trait]
    impl Operation for PingOperation {
        fn name(&self) -> &str {
            "ping"
        }

        fn description(&self) -> &str {
            "Replies with pong"
        }

        fn parameters_schema(&self) -> OperationSchema {
            OperationSchema::new()
        }

        async fn invoke(&self, _args: Value) -> Result<Value> {
            Ok(serde_json::json!({"pong": true}))
        }
    }

    fn transport_with_agent() -> InProcessTransport {
        let transport = InProcessTransport::new();
        let registry = OperationRegistry::new();
        registry.register(PingOperation).unwrap();
        transport.register_agent("ping-agent", registry);
        transport
    }

    #[tokio::test]
    async fn test_transport_creation() {
        let transport = InProcessTransport::new();
        assert_eq!(transport.name(), "in_process");
    }

    #[tokio::test]
    async fn test_full_session_lifecycle() {
        let transport = transport_with_agent();
        let addr = AgentAddress::local("ping-agent");

        let mut session = transport.connect(&addr).await.unwrap();
        session.initialize().await.unwrap();

        let result = session.invoke("ping", serde_json::json!({})).await.unwrap();
        assert_eq!(result["pong"], true);

        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_unknown_agent() {
        let transport = InProcessTransport::new();
        let addr = AgentAddress::local("missing");

        let result = transport.connect(&addr).await;
        assert!(matches!(result, Err(CommsError::AgentNotFound(_))));
    }

    #[tokio::test]
    async fn test_invoke_before_initialize() {
        let transport = transport_with_agent();
        let addr = AgentAddress::local("ping-agent");

        let mut session = transport.connect(&addr).await.unwrap();
        let result = session.invoke("ping", serde_json::json!({})).await;

        assert!(matches!(result, Err(CommsError::Transport(_))));
    }

    #[tokio::test]
    async fn test_invoke_unknown_operation() {
        let transport = transport_with_agent();
        let addr = AgentAddress::local("ping-agent");

        let mut session = transport.connect(&addr).await.unwrap();
        session.initialize().await.unwrap();

        let result = session.invoke("nonexistent", serde_json::json!({})).await;
        assert!(matches!(result, Err(CommsError::OperationNotFound(_))));
    }
}
