//! Per-cycle mailbox partitions

use dashmap::DashMap;
use std::sync::Arc;

use crate::InMemoryMailbox;

/// Hands each aggregation cycle an isolated mailbox partition
///
/// Partitions are keyed by `task_id`, so one cycle's clear cannot race a
/// neighboring cycle's signals. Drop the partition once the cycle is done.
#[derive(Clone)]
pub struct MailboxHub {
    partitions: Arc<DashMap<String, Arc<InMemoryMailbox>>>,
}

impl MailboxHub {
    /// Create a new hub with no partitions
    pub fn new() -> Self {
        Self {
            partitions: Arc::new(DashMap::new()),
        }
    }

    /// Get the partition for a cycle, creating it on first use
    pub fn partition(&self, task_id: &str) -> Arc<InMemoryMailbox> {
        self.partitions
            .entry(task_id.to_string())
            .or_insert_with(|| Arc::new(InMemoryMailbox::new()))
            .clone()
    }

    /// Discard a cycle's partition
    pub fn drop_partition(&self, task_id: &str) {
        if self.partitions.remove(task_id).is_some() {
            tracing::debug!("Dropped mailbox partition for task {}", task_id);
        }
    }

    /// Number of live partitions
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}

impl Default for MailboxHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Envelope, Mailbox, SignalStatus};

    #[tokio::test]
    async fn test_partition_reuse() {
        let hub = MailboxHub::new();

        let first = hub.partition("task-1");
        first
            .post(Envelope::new(
                "a",
                "b",
                "task-1",
                SignalStatus::DataGathered,
                serde_json::json!({}),
            ))
            .await;

        // Same key returns the same partition
        let again = hub.partition("task-1");
        assert_eq!(again.read_all().await.len(), 1);
        assert_eq!(hub.partition_count(), 1);
    }

    #[tokio::test]
    async fn test_partitions_are_isolated() {
        let hub = MailboxHub::new();

        let one = hub.partition("task-1");
        let two = hub.partition("task-2");

        one.post(Envelope::new(
            "a",
            "b",
            "task-1",
            SignalStatus::DataGathered,
            serde_json::json!({}),
        ))
        .await;

        // Clearing one cycle's partition leaves the other untouched
        two.clear().await;
        assert_eq!(one.read_all().await.len(), 1);
        assert!(two.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_drop_partition() {
        let hub = MailboxHub::new();

        hub.partition("task-1");
        assert_eq!(hub.partition_count(), 1);

        hub.drop_partition("task-1");
        assert_eq!(hub.partition_count(), 0);

        // Dropping an unknown key is a no-op
        hub.drop_partition("task-1");
    }
}
