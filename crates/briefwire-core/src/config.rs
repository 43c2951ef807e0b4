//! Configuration management for the briefwire services
//!
//! This module provides configuration loading from multiple sources:
//! - Default values
//! - Configuration files (TOML, JSON, YAML)
//! - Environment variables (`BRIEFWIRE__` prefix)

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the briefwire services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefwireConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Pipeline timing settings
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// LLM model selection
    #[serde(default)]
    pub llm: LlmSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON format
    #[serde(default)]
    pub json: bool,
}

/// Pipeline timing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// How long the aggregation stage waits for the gather signal
    #[serde(default = "default_correlation_timeout")]
    pub correlation_timeout_secs: u64,

    /// How often the correlator re-reads the mailbox while waiting
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// LLM model selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Model used to render the daily brief
    #[serde(default = "default_brief_model")]
    pub brief_model: String,

    /// Cheaper model used for the location-context lookup
    #[serde(default = "default_location_model")]
    pub location_model: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_correlation_timeout() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    1
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_brief_model() -> String {
    "gpt-4o".to_string()
}

fn default_location_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            correlation_timeout_secs: default_correlation_timeout(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            brief_model: default_brief_model(),
            location_model: default_location_model(),
        }
    }
}

impl Default for BriefwireConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            pipeline: PipelineSettings::default(),
            server: ServerSettings::default(),
            llm: LlmSettings::default(),
        }
    }
}

/// Load configuration from a file
///
/// Supports TOML, JSON, and YAML formats based on file extension.
/// Environment variables with the `BRIEFWIRE__` prefix override file values.
///
/// # Example
///
/// ```no_run
/// use briefwire_core::config::load_config;
///
/// let config = load_config("briefwire.toml").unwrap();
/// println!("Server port: {}", config.server.port);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BriefwireConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CoreError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("BRIEFWIRE").separator("__"))
        .build()?;

    let config: BriefwireConfig = settings.try_deserialize()?;

    tracing::info!("Configuration loaded from {}", path.display());

    Ok(config)
}

/// Load configuration with defaults if file doesn't exist
///
/// This is useful for optional configuration files.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> BriefwireConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            BriefwireConfig::default()
        }
    }
}
