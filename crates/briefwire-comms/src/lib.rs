//! Briefwire Communication Layer
//!
//! Coordinates independent service agents through a shared mailbox,
//! a task-correlation protocol, and a fan-out aggregator.
//!
//! # Example
//!
//! ```no_run
//! use briefwire_comms::{Envelope, InMemoryMailbox, Mailbox, SignalStatus};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mailbox = InMemoryMailbox::new();
//!
//!     let envelope = Envelope::new(
//!         "contextualist",
//!         "scout",
//!         "task-1",
//!         SignalStatus::DataGathered,
//!         serde_json::json!({"topic": "AI"}),
//!     );
//!
//!     mailbox.post(envelope).await;
//!     let stored = mailbox.read_all().await;
//!     assert_eq!(stored.len(), 1);
//! }
//! ```

pub mod error;
pub mod address;
pub mod envelope;
pub mod mailbox;
pub mod file_mailbox;
pub mod hub;
pub mod correlator;
pub mod schema;
pub mod operation;
pub mod registry;
pub mod transport;
pub mod aggregator;

// In-process transport
pub mod in_process;

// HTTP transport
pub mod http_transport;

// Re-exports
pub use error::{CommsError, Result};
pub use address::{AgentAddress, AgentLocation};
pub use envelope::{Envelope, SignalStatus};
pub use mailbox::{InMemoryMailbox, Mailbox};
pub use file_mailbox::FileMailbox;
pub use hub::MailboxHub;
pub use correlator::Correlator;
pub use schema::OperationSchema;
pub use operation::Operation;
pub use registry::OperationRegistry;
pub use transport::{AgentSession, AgentTransport};
pub use aggregator::{call_operation, decode_payload, fan_out, SubOperation};

pub use in_process::InProcessTransport;
pub use http_transport::HttpTransport;
