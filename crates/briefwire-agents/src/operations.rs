//! Operation adapters exposing stages to remote callers

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use briefwire_comms::{schema::property, Operation, OperationSchema};

use crate::{ContextualistStage, PublisherStage, ScoutStage, StageError};

fn default_task_id() -> String {
    "default_task".to_string()
}

fn default_scout_task_id() -> String {
    "scout_task".to_string()
}

#[derive(Debug, Deserialize)]
struct ContextualizeParams {
    topic: String,
    city: String,
    #[serde(default = "default_task_id")]
    task_id: String,
}

#[derive(Debug, Deserialize)]
struct ScoutParams {
    topic: String,
    city: String,
    #[serde(default = "default_scout_task_id")]
    task_id: String,
}

#[derive(Debug, Deserialize)]
struct PublishBriefParams {
    payload: Value,
}

fn topic_city_schema(description: &str) -> OperationSchema {
    OperationSchema::new()
        .with_description(description)
        .with_properties(serde_json::json!({
            "topic": property("string", "Topic of the daily brief"),
            "city": property("string", "City providing local context"),
            "task_id": property("string", "Correlation id for this cycle"),
        }))
        .with_required(vec!["topic".to_string(), "city".to_string()])
}

/// Exposes `ContextualistStage::contextualize` as a named operation
pub struct ContextualizeOperation {
    stage: Arc<ContextualistStage>,
}

impl ContextualizeOperation {
    pub fn new(stage: Arc<ContextualistStage>) -> Self {
        Self { stage }
    }
}

#[async_trait]
impl Operation for ContextualizeOperation {
    fn name(&self) -> &str {
        "contextualize"
    }

    fn description(&self) -> &str {
        "Gather news, weather, and financial context for a topic and city"
    }

    fn parameters_schema(&self) -> OperationSchema {
        topic_city_schema("Parameters for contextualization")
    }

    async fn invoke(&self, args: Value) -> briefwire_comms::Result<Value> {
        let params: ContextualizeParams = serde_json::from_value(args)
            .map_err(|e| StageError::invalid_payload(e.to_string()))?;

        Ok(self
            .stage
            .contextualize(&params.topic, &params.city, &params.task_id)
            .await?)
    }
}

/// Exposes `ScoutStage::scout` as a named operation
pub struct ScoutOperation {
    stage: Arc<ScoutStage>,
}

impl ScoutOperation {
    pub fn new(stage: Arc<ScoutStage>) -> Self {
        Self { stage }
    }
}

#[async_trait]
impl Operation for ScoutOperation {
    fn name(&self) -> &str {
        "scout"
    }

    fn description(&self) -> &str {
        "Coordinate contextualization and media gathering for a topic"
    }

    fn parameters_schema(&self) -> OperationSchema {
        topic_city_schema("Parameters for scouting")
    }

    async fn invoke(&self, args: Value) -> briefwire_comms::Result<Value> {
        let params: ScoutParams = serde_json::from_value(args)
            .map_err(|e| StageError::invalid_payload(e.to_string()))?;

        Ok(self
            .stage
            .scout(&params.topic, &params.city, &params.task_id)
            .await?)
    }
}

/// Exposes `PublisherStage::publish_brief` as a named operation
pub struct PublishBriefOperation {
    stage: Arc<PublisherStage>,
}

impl PublishBriefOperation {
    pub fn new(stage: Arc<PublisherStage>) -> Self {
        Self { stage }
    }
}

#[async_trait]
impl Operation for PublishBriefOperation {
    fn name(&self) -> &str {
        "publish_brief"
    }

    fn description(&self) -> &str {
        "Generate a journalistic daily brief article from aggregated signals"
    }

    fn parameters_schema(&self) -> OperationSchema {
        OperationSchema::new()
            .with_description("Parameters for brief rendering")
            .with_properties(serde_json::json!({
                "payload": property("object", "Aggregated signal to render"),
            }))
            .with_required(vec!["payload".to_string()])
    }

    async fn invoke(&self, args: Value) -> briefwire_comms::Result<Value> {
        let params: PublishBriefParams = serde_json::from_value(args)
            .map_err(|e| StageError::invalid_payload(e.to_string()))?;

        Ok(self.stage.publish_brief(params.payload).await?)
    }
}
