//! Pipeline driver: walks one brief cycle through its states

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::{PublisherStage, ScoutStage};

/// State of one brief cycle
///
/// Cycles move `Gathering -> Aggregating -> Rendering -> Done`; any of
/// the first three can land in the terminal `Error` state instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    Gathering,
    Aggregating,
    Rendering,
    Done,
    Error(String),
}

impl CycleState {
    /// Whether the cycle has finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, CycleState::Done | CycleState::Error(_))
    }
}

/// Outcome of one driven cycle
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// Correlation id the cycle ran under
    pub task_id: String,
    pub topic: String,
    pub city: String,
    /// Terminal state, `Done` or `Error`
    pub state: CycleState,
    /// Aggregated signal, present once aggregation succeeded
    pub signal: Option<Value>,
    /// Rendered brief, present only on `Done`
    pub brief: Option<Value>,
}

/// Drives a full cycle: gather, aggregate, render
///
/// Each cycle gets a fresh task id, so a retried topic never correlates
/// against a previous attempt's envelopes. The driver never panics or
/// returns an error; failures end the cycle in `CycleState::Error`.
pub struct PipelineDriver {
    scout: Arc<ScoutStage>,
    publisher: Arc<PublisherStage>,
}

impl PipelineDriver {
    /// Create a new pipeline driver
    pub fn new(scout: Arc<ScoutStage>, publisher: Arc<PublisherStage>) -> Self {
        Self { scout, publisher }
    }

    /// Run one cycle for a topic and city
    pub async fn run_cycle(&self, topic: &str, city: &str) -> CycleReport {
        let task_id = Uuid::new_v4().to_string();

        let mut report = CycleReport {
            task_id: task_id.clone(),
            topic: topic.to_string(),
            city: city.to_string(),
            state: CycleState::Gathering,
            signal: None,
            brief: None,
        };

        tracing::info!("Cycle {} entering {:?}", task_id, report.state);
        let context = match self.scout.gather(topic, city, &task_id).await {
            Ok(context) => context,
            Err(e) => {
                tracing::error!("Cycle {} failed while gathering: {}", task_id, e);
                report.state = CycleState::Error(e.to_string());
                return report;
            }
        };

        report.state = CycleState::Aggregating;
        tracing::info!("Cycle {} entering {:?}", task_id, report.state);
        let signal = match self.scout.aggregate(topic, city, &task_id, context).await {
            Ok(signal) => signal,
            Err(e) => {
                tracing::error!("Cycle {} failed while aggregating: {}", task_id, e);
                report.state = CycleState::Error(e.to_string());
                return report;
            }
        };
        report.signal = Some(signal.clone());

        report.state = CycleState::Rendering;
        tracing::info!("Cycle {} entering {:?}", task_id, report.state);
        match self.publisher.publish_brief(signal).await {
            Ok(brief) => {
                report.brief = Some(brief);
                report.state = CycleState::Done;
                tracing::info!("Cycle {} done", task_id);
            }
            Err(e) => {
                tracing::error!("Cycle {} failed while rendering: {}", task_id, e);
                report.state = CycleState::Error(e.to_string());
            }
        }

        report
    }
}
