//! External Data Operations
//!
//! Implementations of the operations briefwire agents expose for
//! gathering context: news headlines, current weather, FX rates, and
//! stock photos. Each one wraps a public HTTP API and returns a flat
//! JSON payload trimmed to the fields the brief actually uses.
//!
//! # Example
//!
//! ```no_run
//! use briefwire_comms::{Operation, OperationRegistry};
//! use briefwire_tools::SearchNewsOperation;
//!
//! fn build_registry() -> briefwire_comms::Result<OperationRegistry> {
//!     let registry = OperationRegistry::new();
//!     registry.register(SearchNewsOperation::new("api-key"))?;
//!     Ok(registry)
//! }
//! ```

pub mod error;
pub mod fx;
pub mod images;
pub mod news;
pub mod weather;

// Re-exports
pub use error::{Result, ToolError};
pub use fx::{currency_code, GetFxRateOperation};
pub use images::SearchImagesOperation;
pub use news::SearchNewsOperation;
pub use weather::GetWeatherOperation;
