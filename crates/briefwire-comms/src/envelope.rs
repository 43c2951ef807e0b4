//! Mailbox envelopes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pipeline stage a signal reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStatus {
    /// The gather stage has posted its contextual signal
    DataGathered,

    /// The aggregation stage has posted the merged signal
    AggregationComplete,
}

/// Cross-agent signal stored in the mailbox
///
/// Envelopes are immutable once written; storage order equals append order.
/// `sender` and `recipient` are informational, the mailbox never routes by
/// recipient. Correlation happens on `task_id` and `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Logical name of the posting agent
    pub sender: String,

    /// Logical name of the intended reader
    pub recipient: String,

    /// Correlation key, unique per in-flight cycle
    pub task_id: String,

    /// What the sender is signaling
    pub status: SignalStatus,

    /// Opaque JSON payload
    pub payload: Value,

    /// Assigned by the mailbox at write time, human-facing only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl Envelope {
    /// Create a new unstamped envelope
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        task_id: impl Into<String>,
        status: SignalStatus,
        payload: Value,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            task_id: task_id.into(),
            status,
            payload,
            timestamp: None,
        }
    }

    /// Check whether this envelope answers the given correlation key
    pub fn matches(&self, task_id: &str, status: SignalStatus) -> bool {
        self.task_id == task_id && self.status == status
    }
}
