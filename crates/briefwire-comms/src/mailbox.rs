//! Shared mailbox for asynchronous cross-agent signaling

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::Envelope;

/// Append-only envelope store
///
/// Implementations fail open: an unreadable backing store reads as empty
/// and write failures are logged, never surfaced to the caller. The
/// read-modify-append sequence is serialized behind a lock so concurrent
/// posts cannot lose updates.
#[async_trait]
pub trait Mailbox: Send + Sync {
    /// Append an envelope, stamping it with the write time
    async fn post(&self, envelope: Envelope);

    /// All stored envelopes, oldest first
    async fn read_all(&self) -> Vec<Envelope>;

    /// Atomically reset the store to empty
    async fn clear(&self);
}

/// Pick a write timestamp that never moves backwards
///
/// Wall clocks can step; append order must still carry non-decreasing
/// timestamps.
pub(crate) fn stamp_after(last: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match last {
        Some(prev) if prev > now => prev,
        _ => now,
    }
}

struct Inner {
    entries: Vec<Envelope>,
    last_stamp: Option<DateTime<Utc>>,
}

/// In-memory mailbox guarded by a mutex
///
/// # Example
///
/// ```
/// use briefwire_comms::{Envelope, InMemoryMailbox, Mailbox, SignalStatus};
///
/// #[tokio::main]
/// async fn main() {
///     let mailbox = InMemoryMailbox::new();
///     let env = Envelope::new("a", "b", "t1", SignalStatus::DataGathered, serde_json::json!({}));
///
///     mailbox.post(env).await;
///     assert_eq!(mailbox.read_all().await.len(), 1);
///
///     mailbox.clear().await;
///     assert!(mailbox.read_all().await.is_empty());
/// }
/// ```
#[derive(Clone)]
pub struct InMemoryMailbox {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryMailbox {
    /// Create a new empty mailbox
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: Vec::new(),
                last_stamp: None,
            })),
        }
    }
}

impl Default for InMemoryMailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailbox for InMemoryMailbox {
    async fn post(&self, mut envelope: Envelope) {
        let mut inner = self.inner.lock().await;

        let stamp = stamp_after(inner.last_stamp);
        envelope.timestamp = Some(stamp);
        inner.last_stamp = Some(stamp);

        tracing::debug!(
            "Posting envelope {} -> {} (task {}, {:?})",
            envelope.sender,
            envelope.recipient,
            envelope.task_id,
            envelope.status
        );
        inner.entries.push(envelope);
    }

    async fn read_all(&self) -> Vec<Envelope> {
        self.inner.lock().await.entries.clone()
    }

    async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        let count = inner.entries.len();
        inner.entries.clear();
        tracing::debug!("Cleared {} envelopes from mailbox", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SignalStatus;

    fn envelope(task_id: &str, status: SignalStatus, payload: serde_json::Value) -> Envelope {
        Envelope::new("a", "b", task_id, status, payload)
    }

    #[tokio::test]
    async fn test_post_and_read_preserve_order() {
        let mailbox = InMemoryMailbox::new();

        for i in 0..5 {
            mailbox
                .post(envelope(
                    &format!("task-{}", i),
                    SignalStatus::DataGathered,
                    serde_json::json!({ "seq": i }),
                ))
                .await;
        }

        let stored = mailbox.read_all().await;
        assert_eq!(stored.len(), 5);
        for (i, env) in stored.iter().enumerate() {
            assert_eq!(env.payload["seq"], i);
        }
    }

    #[tokio::test]
    async fn test_timestamps_non_decreasing() {
        let mailbox = InMemoryMailbox::new();

        for _ in 0..10 {
            mailbox
                .post(envelope("t", SignalStatus::DataGathered, serde_json::json!({})))
                .await;
        }

        let stored = mailbox.read_all().await;
        let stamps: Vec<_> = stored.iter().map(|e| e.timestamp.unwrap()).collect();
        for pair in stamps.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[tokio::test]
    async fn test_clear_empties_store() {
        let mailbox = InMemoryMailbox::new();
        mailbox
            .post(envelope("t", SignalStatus::DataGathered, serde_json::json!({})))
            .await;
        mailbox
            .post(envelope("t", SignalStatus::AggregationComplete, serde_json::json!({})))
            .await;

        mailbox.clear().await;
        assert!(mailbox.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_payload_round_trip() {
        let mailbox = InMemoryMailbox::new();
        let payload = serde_json::json!({"nested": {"x": 1, "y": [1, 2, 3]}, "s": "text"});

        mailbox
            .post(envelope("t", SignalStatus::DataGathered, payload.clone()))
            .await;

        let stored = mailbox.read_all().await;
        assert_eq!(stored[0].payload, payload);
    }

    #[tokio::test]
    async fn test_concurrent_posts_all_stored() {
        let mailbox = InMemoryMailbox::new();

        let mut handles = Vec::new();
        for i in 0..20 {
            let mailbox = mailbox.clone();
            handles.push(tokio::spawn(async move {
                mailbox
                    .post(Envelope::new(
                        "a",
                        "b",
                        format!("task-{}", i),
                        SignalStatus::DataGathered,
                        serde_json::json!({}),
                    ))
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(mailbox.read_all().await.len(), 20);
    }

    #[test]
    fn test_stamp_after_never_regresses() {
        let future = Utc::now() + chrono::Duration::seconds(60);
        assert_eq!(stamp_after(Some(future)), future);

        let past = Utc::now() - chrono::Duration::seconds(60);
        assert!(stamp_after(Some(past)) > past);
    }
}
