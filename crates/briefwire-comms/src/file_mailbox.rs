//! File-backed mailbox

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::mailbox::{stamp_after, Mailbox};
use crate::Envelope;

/// Mailbox persisted as a single JSON file
///
/// The whole file is read, extended, and rewritten under one lock per
/// post, so interleaved writers cannot drop each other's envelopes. A
/// missing or corrupt file reads as empty; write failures are logged and
/// the caller never sees an error.
pub struct FileMailbox {
    path: PathBuf,
    // Guards the read-modify-write cycle and carries the last stamp
    // handed out, keeping timestamps non-decreasing across posts.
    last_stamp: Mutex<Option<DateTime<Utc>>>,
}

impl FileMailbox {
    /// Create a mailbox backed by the given file
    ///
    /// The file is created lazily on the first post.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_stamp: Mutex::new(None),
        }
    }

    async fn read_entries(&self) -> Vec<Envelope> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        "Mailbox file {} is corrupt, treating as empty: {}",
                        self.path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    "Failed to read mailbox file {}, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn write_entries(&self, entries: &[Envelope]) {
        let bytes = match serde_json::to_vec_pretty(entries) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to serialize mailbox contents: {}", e);
                return;
            }
        };

        if let Err(e) = tokio::fs::write(&self.path, bytes).await {
            tracing::error!(
                "Failed to write mailbox file {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[async_trait]
impl Mailbox for FileMailbox {
    async fn post(&self, mut envelope: Envelope) {
        let mut last = self.last_stamp.lock().await;

        let mut entries = self.read_entries().await;

        // A restarted process has an empty last_stamp; recover it from
        // the file so stamps stay ordered across restarts.
        let prior = entries
            .last()
            .and_then(|e| e.timestamp)
            .max(*last);
        let stamp = stamp_after(prior);
        envelope.timestamp = Some(stamp);
        *last = Some(stamp);

        tracing::debug!(
            "Posting envelope {} -> {} (task {}, {:?})",
            envelope.sender,
            envelope.recipient,
            envelope.task_id,
            envelope.status
        );

        entries.push(envelope);
        self.write_entries(&entries).await;
    }

    async fn read_all(&self) -> Vec<Envelope> {
        let _guard = self.last_stamp.lock().await;
        self.read_entries().await
    }

    async fn clear(&self) {
        let _guard = self.last_stamp.lock().await;
        self.write_entries(&[]).await;
        tracing::debug!("Cleared mailbox file {}", self.path.display());
    }
}
