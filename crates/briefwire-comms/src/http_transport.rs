//! HTTP-based transport for cross-process invocation

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    AgentAddress, AgentLocation, AgentSession, AgentTransport, CommsError, Result,
};

/// HTTP transport
///
/// Reaches agents hosted by a briefwire server across processes and
/// networks. Addresses with a `Network` location override the default
/// base URL.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn agent_url(&self, agent: &AgentAddress) -> String {
        match &agent.location {
            AgentLocation::Network { host, port } => {
                format!("http://{}:{}/agents/{}", host, port, agent.id)
            }
            AgentLocation::Local => format!("{}/agents/{}", self.base_url, agent.id),
        }
    }
}

#[async_trait]
impl AgentTransport for HttpTransport {
    async fn connect(&self, agent: &AgentAddress) -> Result<Box<dyn AgentSession>> {
        Ok(Box::new(HttpSession {
            client: self.client.clone(),
            agent_url: self.agent_url(agent),
            agent_id: agent.id.clone(),
            initialized: false,
        }))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Session against one agent on a briefwire server
pub struct HttpSession {
    client: Client,
    agent_url: String,
    agent_id: String,
    initialized: bool,
}

#[async_trait]
impl AgentSession for HttpSession {
    async fn initialize(&mut self) -> Result<()> {
        let response = self
            .client
            .get(&self.agent_url)
            .send()
            .await
            .map_err(|e| CommsError::transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CommsError::AgentNotFound(self.agent_id.clone()));
        }
        if !response.status().is_success() {
            return Err(CommsError::transport(format!(
                "handshake with {} failed: {}",
                self.agent_id,
                response.status()
            )));
        }

        self.initialized = true;
        Ok(())
    }

    async fn invoke(&mut self, operation: &str, args: Value) -> Result<Value> {
        if !self.initialized {
            return Err(CommsError::transport("session not initialized"));
        }

        let url = format!("{}/operations/{}", self.agent_url, operation);
        let response = self
            .client
            .post(&url)
            .json(&args)
            .send()
            .await
            .map_err(|e| CommsError::transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CommsError::OperationNotFound(operation.to_string()));
        }
        if !response.status().is_success() {
            return Err(CommsError::transport(format!(
                "invoke {} on {} failed: {}",
                operation,
                self.agent_id,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CommsError::transport(format!("JSON parse error: {}", e)))
    }

    async fn close(&mut self) -> Result<()> {
        self.initialized = false;
        Ok(())
    }
}
