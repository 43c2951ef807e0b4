//! Scout stage: drives gathering and aggregation for one cycle

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use briefwire_comms::{
    call_operation, AgentAddress, AgentTransport, Correlator, Envelope, Mailbox, MailboxHub,
    SignalStatus,
};

use crate::error::Result;

const DEFAULT_CORRELATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Coordinates contextualization and media gathering for a topic
///
/// Owns the gathering and aggregating steps of a cycle: it clears the
/// cycle's partition, triggers the contextualist, waits for the
/// `data_gathered` signal, then fetches media and posts the combined
/// signal tagged `aggregation_complete`.
pub struct ScoutStage {
    transport: Arc<dyn AgentTransport>,
    contextualist: AgentAddress,
    media: AgentAddress,
    hub: MailboxHub,
    correlation_timeout: Duration,
    poll_interval: Option<Duration>,
}

impl ScoutStage {
    /// Create a new scout stage
    pub fn new(
        transport: Arc<dyn AgentTransport>,
        contextualist: AgentAddress,
        media: AgentAddress,
        hub: MailboxHub,
    ) -> Self {
        Self {
            transport,
            contextualist,
            media,
            hub,
            correlation_timeout: DEFAULT_CORRELATION_TIMEOUT,
            poll_interval: None,
        }
    }

    /// Set how long to wait for the contextualization signal
    pub fn with_correlation_timeout(mut self, timeout: Duration) -> Self {
        self.correlation_timeout = timeout;
        self
    }

    /// Set the correlator poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Trigger contextualization and wait for its signal
    ///
    /// Clears the cycle's partition first so stale envelopes from an
    /// aborted cycle with the same id cannot satisfy the wait. The
    /// trigger itself is fire-and-forget; the result arrives through
    /// the mailbox.
    pub async fn gather(&self, topic: &str, city: &str, task_id: &str) -> Result<Value> {
        let partition = self.hub.partition(task_id);
        partition.clear().await;

        tracing::info!("Triggering contextualization for '{}' in {}", topic, city);

        let transport = Arc::clone(&self.transport);
        let contextualist = self.contextualist.clone();
        let args = serde_json::json!({
            "topic": topic,
            "city": city,
            "task_id": task_id,
        });
        tokio::spawn(async move {
            if let Err(e) =
                call_operation(transport.as_ref(), &contextualist, "contextualize", args).await
            {
                tracing::warn!("Contextualize trigger failed: {}", e);
            }
        });

        let correlator = match self.poll_interval {
            Some(interval) => Correlator::new(partition).with_poll_interval(interval),
            None => Correlator::new(partition),
        };

        tracing::info!("Waiting for contextualization signal ({})", task_id);
        let envelope = correlator
            .await_envelope(task_id, SignalStatus::DataGathered, self.correlation_timeout)
            .await?;

        Ok(envelope.payload)
    }

    /// Fetch media and post the combined signal
    ///
    /// The media call is direct request/response, not mailbox-correlated.
    pub async fn aggregate(
        &self,
        topic: &str,
        city: &str,
        task_id: &str,
        context: Value,
    ) -> Result<Value> {
        tracing::info!("Searching for images for topic '{}'", topic);
        let media = call_operation(
            self.transport.as_ref(),
            &self.media,
            "search_images",
            serde_json::json!({ "query": topic, "count": 2 }),
        )
        .await?;

        let signal = serde_json::json!({
            "topic": topic,
            "city": city,
            "context": context,
            "media": media,
        });

        self.hub
            .partition(task_id)
            .post(Envelope::new(
                "scout",
                "publisher",
                task_id,
                SignalStatus::AggregationComplete,
                signal.clone(),
            ))
            .await;

        Ok(signal)
    }

    /// Run gathering and aggregation back to back
    pub async fn scout(&self, topic: &str, city: &str, task_id: &str) -> Result<Value> {
        let context = self.gather(topic, city, task_id).await?;
        self.aggregate(topic, city, task_id, context).await
    }
}
