//! Concurrent fan-out over agent operations
//!
//! The aggregation stage calls several collaborators at once and merges
//! their answers into one payload. A failing collaborator fills its slot
//! with an `{"error": ...}` value instead of failing the whole round.

use futures::future::join_all;
use serde_json::Value;

use crate::{AgentAddress, AgentTransport, Result};

/// One slot in a fan-out round
///
/// Names the agent and operation to call, the arguments to pass, and the
/// key the result lands under in the merged payload.
#[derive(Debug, Clone)]
pub struct SubOperation {
    /// Key for this result in the merged output
    pub slot: String,
    /// Agent that hosts the operation
    pub agent: AgentAddress,
    /// Operation name to invoke
    pub operation: String,
    /// JSON arguments
    pub args: Value,
}

impl SubOperation {
    /// Create a new sub-operation
    pub fn new(
        slot: impl Into<String>,
        agent: AgentAddress,
        operation: impl Into<String>,
        args: Value,
    ) -> Self {
        Self {
            slot: slot.into(),
            agent,
            operation: operation.into(),
            args,
        }
    }
}

/// Decode an operation result into structured JSON
///
/// Some agents return JSON encoded as a string. Strings that parse as
/// JSON are unwrapped; strings that don't are kept under a `"data"` key.
/// Everything else passes through unchanged.
pub fn decode_payload(value: Value) -> Value {
    match value {
        Value::String(raw) => match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(_) => serde_json::json!({ "data": raw }),
        },
        other => other,
    }
}

/// Call a single operation over a transport
///
/// Runs the full session lifecycle and decodes the result. The session
/// is closed on every exit path; a failing close is logged and does not
/// mask the invocation result.
pub async fn call_operation(
    transport: &dyn AgentTransport,
    agent: &AgentAddress,
    operation: &str,
    args: Value,
) -> Result<Value> {
    let mut session = transport.connect(agent).await?;

    let invoked = match session.initialize().await {
        Ok(()) => session.invoke(operation, args).await,
        Err(e) => Err(e),
    };

    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close session to {}: {}", agent.id, e);
    }

    invoked.map(decode_payload)
}

/// Fan out to several operations concurrently and merge the results
///
/// Every sub-operation runs at the same time. Each result lands under
/// its slot key; a failed sub-operation contributes
/// `{"error": "<message>"}` in its slot and the others are unaffected.
pub async fn fan_out(transport: &dyn AgentTransport, operations: Vec<SubOperation>) -> Value {
    let calls = operations.into_iter().map(|op| async move {
        let SubOperation {
            slot,
            agent,
            operation,
            args,
        } = op;

        tracing::debug!("Fanning out {} -> {}::{}", slot, agent.id, operation);

        let value = match call_operation(transport, &agent, &operation, args).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Sub-operation {} failed: {}", slot, e);
                serde_json::json!({ "error": e.to_string() })
            }
        };

        (slot, value)
    });

    let mut merged = serde_json::Map::new();
    for (slot, value) in join_all(calls).await {
        merged.insert(slot, value);
    }

    Value::Object(merged)
}
