//! Task correlation against the mailbox

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::{CommsError, Envelope, Mailbox, Result, SignalStatus};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Blocks a downstream stage until an upstream signal appears
///
/// The correlator re-reads the mailbox on a fixed interval and returns
/// the first envelope in append order matching `(task_id, status)`. It
/// never consumes what it matches; the mailbox is read-only from its
/// perspective.
pub struct Correlator {
    mailbox: Arc<dyn Mailbox>,
    poll_interval: Duration,
}

impl Correlator {
    /// Create a correlator over the given mailbox
    pub fn new(mailbox: Arc<dyn Mailbox>) -> Self {
        Self {
            mailbox,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Wait for the first envelope matching the correlation key
    ///
    /// Fails with [`CommsError::CorrelationTimeout`] once `timeout` has
    /// elapsed. The deadline is observed no earlier than `timeout` and no
    /// later than `timeout` plus one poll interval.
    pub async fn await_envelope(
        &self,
        task_id: &str,
        expected: SignalStatus,
        timeout: Duration,
    ) -> Result<Envelope> {
        let deadline = Instant::now() + timeout;
        tracing::debug!("Waiting for task {} to reach {:?}", task_id, expected);

        loop {
            let envelopes = self.mailbox.read_all().await;
            if let Some(found) = envelopes
                .into_iter()
                .find(|env| env.matches(task_id, expected))
            {
                tracing::debug!("Matched envelope for task {}", task_id);
                return Ok(found);
            }

            if Instant::now() >= deadline {
                return Err(CommsError::CorrelationTimeout {
                    task_id: task_id.to_string(),
                    waited: timeout,
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
