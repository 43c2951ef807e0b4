//! Publisher stage: renders the daily brief article

use serde_json::Value;
use std::sync::Arc;

use briefwire_llm::{ChatOptions, LLMProvider, Message};

use crate::error::Result;

const BRIEF_SYSTEM_PROMPT: &str = "You are a professional journalist writing daily briefs.";
const BRIEF_MAX_TOKENS: u32 = 1000;
const BRIEF_TEMPERATURE: f32 = 0.7;

/// Renders an aggregated signal into a journalistic daily brief
pub struct PublisherStage {
    provider: Arc<dyn LLMProvider>,
}

impl PublisherStage {
    /// Create a new publisher stage
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    fn build_prompt(topic: &str, city: &str, context: &Value, media: &Value) -> String {
        let empty = Value::Object(serde_json::Map::new());
        let news = context.get("news_context").unwrap_or(&empty);
        let weather = context.get("weather_context").unwrap_or(&empty);
        let financial = context.get("financial_context").unwrap_or(&empty);
        let no_images = Value::Array(vec![]);
        let images = media.get("images").unwrap_or(&no_images);

        format!(
            "Write a neutral, journalistic daily brief article based strictly on the following data:\n\
            \n\
            Topic: {topic}\n\
            City: {city}\n\
            \n\
            Contextual Data:\n\
            - News: {news}\n\
            - Weather: {weather}\n\
            - Financial (FX Rate): {financial}\n\
            \n\
            Media Data:\n\
            - Images: {images}\n\
            \n\
            The article should include the following sections clearly:\n\
            1. A catchy Headline.\n\
            2. A summary paragraph of the main news.\n\
            3. A \"Why it matters\" section explaining the significance.\n\
            4. A \"Local Context\" section including weather and financial info for {city}.\n\
            5. A mention of available media assets.\n\
            \n\
            Maintain a professional and informative tone."
        )
    }

    /// Generate the daily brief article from an aggregated signal
    ///
    /// Missing fields degrade to neutral placeholders so a partially
    /// filled signal still renders an article.
    pub async fn publish_brief(&self, payload: Value) -> Result<Value> {
        let topic = payload
            .get("topic")
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string();
        let city = payload
            .get("city")
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string();
        let empty = Value::Object(serde_json::Map::new());
        let context = payload.get("context").unwrap_or(&empty);
        let media = payload.get("media").unwrap_or(&empty);

        let prompt = Self::build_prompt(&topic, &city, context, media);

        tracing::info!("Rendering daily brief for '{}' in {}", topic, city);

        let response = self
            .provider
            .send_message(
                vec![Message::system(BRIEF_SYSTEM_PROMPT), Message::user(prompt)],
                ChatOptions::new()
                    .with_max_tokens(BRIEF_MAX_TOKENS)
                    .with_temperature(BRIEF_TEMPERATURE),
            )
            .await?;

        Ok(serde_json::json!({
            "topic": topic,
            "city": city,
            "article": response.content,
            "original_payload": payload,
        }))
    }
}
