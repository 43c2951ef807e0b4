//! Briefwire CLI
//!
//! Runs one full daily-brief cycle against a running briefwire server:
//! derives a city for the topic, scouts, publishes, and prints the
//! article together with the raw signals.

mod location;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use uuid::Uuid;

use briefwire_comms::{call_operation, AgentAddress, HttpTransport};
use briefwire_core::{init_logging, load_config_or_default, LogConfig};
use briefwire_llm::OpenAIProvider;

/// Generate a daily brief for a topic
#[derive(Debug, Parser)]
#[command(name = "briefwire", version, about)]
struct Cli {
    /// Topic of the daily brief
    topic: String,

    /// City for local context (skips the location lookup)
    #[arg(long)]
    city: Option<String>,

    /// Base URL of the briefwire server
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Config file path
    #[arg(long, default_value = "briefwire.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config_or_default(&cli.config);

    init_logging(LogConfig {
        level: config.logging.level.clone(),
        json: config.logging.json,
    });

    let city = match cli.city {
        Some(city) => city,
        None => {
            let api_key =
                std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
            let provider = OpenAIProvider::new(api_key, &config.llm.location_model)?;
            location::location_for_topic(&provider, &cli.topic).await
        }
    };

    let transport = HttpTransport::new(cli.server);
    let task_id = Uuid::new_v4().to_string();

    tracing::info!("Scouting '{}' in {} ({})", cli.topic, city, task_id);
    let signal = call_operation(
        &transport,
        &AgentAddress::local("scout"),
        "scout",
        serde_json::json!({ "topic": cli.topic, "city": city, "task_id": task_id }),
    )
    .await?;

    if let Some(message) = signal.get("error").and_then(Value::as_str) {
        anyhow::bail!("Scouting failed: {}", message);
    }

    tracing::info!("Rendering the daily brief");
    let brief = call_operation(
        &transport,
        &AgentAddress::local("publisher"),
        "publish_brief",
        serde_json::json!({ "payload": signal }),
    )
    .await?;

    if let Some(message) = brief.get("error").and_then(Value::as_str) {
        anyhow::bail!("Rendering failed: {}", message);
    }

    let article = brief
        .get("article")
        .and_then(Value::as_str)
        .unwrap_or("No article content available.");

    println!("Daily brief for '{}' ({})", cli.topic, city);
    println!();
    println!("{}", article);
    println!();
    println!("Signal payload:");
    println!("{}", serde_json::to_string_pretty(&signal)?);
    println!();
    println!("Raw response:");
    println!("{}", serde_json::to_string_pretty(&brief)?);

    Ok(())
}
