//! Agent addressing

use serde::{Deserialize, Serialize};

/// Location where an agent runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AgentLocation {
    /// Local (same process)
    Local,

    /// Network (reachable over HTTP)
    Network { host: String, port: u16 },
}

/// Universal agent address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAddress {
    /// Agent identifier
    pub id: String,

    /// Where the agent runs
    pub location: AgentLocation,
}

impl AgentAddress {
    /// Create a local agent address
    pub fn local<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            location: AgentLocation::Local,
        }
    }

    /// Create a network agent address
    pub fn network<S: Into<String>>(id: S, host: S, port: u16) -> Self {
        Self {
            id: id.into(),
            location: AgentLocation::Network {
                host: host.into(),
                port,
            },
        }
    }

    /// Check if this is a local agent
    pub fn is_local(&self) -> bool {
        matches!(self.location, AgentLocation::Local)
    }
}
