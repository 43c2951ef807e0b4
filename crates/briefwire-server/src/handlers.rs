//! HTTP handlers for the hosting seam

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use briefwire_comms::CommsError;

use crate::models::{AgentDetail, AgentListResponse, AgentSummary};
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// List hosted agents and their operation names
pub async fn list_agents(State(state): State<AppState>) -> Json<AgentListResponse> {
    let mut agents: Vec<AgentSummary> = state
        .agents
        .iter()
        .map(|entry| AgentSummary {
            id: entry.key().clone(),
            operations: entry.value().list_operations(),
        })
        .collect();
    agents.sort_by(|a, b| a.id.cmp(&b.id));

    Json(AgentListResponse { agents })
}

/// Describe one agent's operations, schemas included
pub async fn get_agent(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Json<AgentDetail>, (StatusCode, String)> {
    let registry = state
        .registry(&agent_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Agent not found: {}", agent_id)))?;

    Ok(Json(AgentDetail {
        id: agent_id,
        operations: registry.describe(),
    }))
}

/// Invoke an operation on a hosted agent
///
/// Operation failures come back as 200 with an `{"error": ...}` body;
/// only unknown agents and operations are HTTP errors.
pub async fn invoke_operation(
    State(state): State<AppState>,
    Path((agent_id, operation)): Path<(String, String)>,
    Json(args): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let registry = state
        .registry(&agent_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Agent not found: {}", agent_id)))?;

    tracing::info!("Invoking {} on agent {}", operation, agent_id);

    match registry.invoke(&operation, args).await {
        Ok(value) => Ok(Json(value)),
        Err(CommsError::OperationNotFound(name)) => Err((
            StatusCode::NOT_FOUND,
            format!("Operation not found: {}", name),
        )),
        Err(e) => {
            tracing::error!("Invoking {} on {} failed: {}", operation, agent_id, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
