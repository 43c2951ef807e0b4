//! Contextualist stage: gathers news, weather, and FX context

use serde_json::Value;
use std::sync::Arc;

use briefwire_comms::{
    fan_out, AgentAddress, AgentTransport, Envelope, Mailbox, MailboxHub, SignalStatus,
    SubOperation,
};

use crate::error::Result;

/// Gathers contextual data for a topic and city
///
/// Fans out to the world-data and finance agents, merges the slots into
/// one signal, and posts it for the scout to correlate on. A failing
/// collaborator degrades its slot, never the whole signal.
pub struct ContextualistStage {
    transport: Arc<dyn AgentTransport>,
    world_data: AgentAddress,
    finance: AgentAddress,
    hub: MailboxHub,
}

impl ContextualistStage {
    /// Create a new contextualist stage
    pub fn new(
        transport: Arc<dyn AgentTransport>,
        world_data: AgentAddress,
        finance: AgentAddress,
        hub: MailboxHub,
    ) -> Self {
        Self {
            transport,
            world_data,
            finance,
            hub,
        }
    }

    /// Gather news, weather, and financial context
    ///
    /// Returns the merged signal and posts it to the cycle's partition
    /// tagged `data_gathered`.
    pub async fn contextualize(&self, topic: &str, city: &str, task_id: &str) -> Result<Value> {
        tracing::info!("Contextualizing topic '{}' for {} ({})", topic, city, task_id);

        let slots = fan_out(
            self.transport.as_ref(),
            vec![
                SubOperation::new(
                    "news_context",
                    self.world_data.clone(),
                    "search_news",
                    serde_json::json!({ "query": topic }),
                ),
                SubOperation::new(
                    "weather_context",
                    self.world_data.clone(),
                    "get_weather",
                    serde_json::json!({ "city": city }),
                ),
                SubOperation::new(
                    "financial_context",
                    self.finance.clone(),
                    "get_fx_rate",
                    serde_json::json!({ "location": city }),
                ),
            ],
        )
        .await;

        let mut signal = serde_json::Map::new();
        signal.insert("topic".to_string(), Value::String(topic.to_string()));
        signal.insert("city".to_string(), Value::String(city.to_string()));
        if let Value::Object(slots) = slots {
            signal.extend(slots);
        }
        let signal = Value::Object(signal);

        self.hub
            .partition(task_id)
            .post(Envelope::new(
                "contextualist",
                "scout",
                task_id,
                SignalStatus::DataGathered,
                signal.clone(),
            ))
            .await;

        Ok(signal)
    }
}
