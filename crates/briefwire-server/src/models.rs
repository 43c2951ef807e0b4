//! Response models for the hosting seam

use serde::Serialize;
use serde_json::Value;

/// One hosted agent in the listing
#[derive(Debug, Serialize)]
pub struct AgentSummary {
    pub id: String,
    pub operations: Vec<String>,
}

/// Response for `GET /agents`
#[derive(Debug, Serialize)]
pub struct AgentListResponse {
    pub agents: Vec<AgentSummary>,
}

/// Response for `GET /agents/{agent_id}`
#[derive(Debug, Serialize)]
pub struct AgentDetail {
    pub id: String,
    pub operations: Vec<Value>,
}
