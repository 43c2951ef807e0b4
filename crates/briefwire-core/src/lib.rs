//! Briefwire Core
//!
//! This crate provides the shared foundation for the briefwire pipeline,
//! including error handling, configuration, and logging setup.

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{load_config, load_config_or_default, BriefwireConfig};
pub use error::{CoreError, Result};
pub use logging::{init_logging, LogConfig};
