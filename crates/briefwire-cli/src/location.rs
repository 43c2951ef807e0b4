//! Location-context lookup for the brief driver

use serde::Deserialize;

use briefwire_llm::{ChatOptions, LLMProvider, Message};

const FALLBACK_CAPITAL: &str = "Washington D.C.";

#[derive(Debug, Deserialize)]
struct LocationContext {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    capital: Option<String>,
}

/// Derive the capital city a topic is about
///
/// Asks the model for strict JSON with `country` and `capital` keys.
/// Any failure, a lookup error, an unparseable reply, or a reply with
/// no capital, falls back to Washington D.C. so the cycle can still run.
pub async fn location_for_topic(provider: &dyn LLMProvider, topic: &str) -> String {
    let prompt = format!(
        "Given the news text below, identify the primary country it is about.\n\
        Return only a JSON object with the keys 'country' and 'capital'.\n\
        If no country is mentioned, return US and its capital for both.\n\
        \n\
        Text: \"{topic}\""
    );

    let response = match provider
        .send_message(
            vec![Message::user(prompt)],
            ChatOptions::new().with_json_mode(),
        )
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Location lookup failed: {}", e);
            return FALLBACK_CAPITAL.to_string();
        }
    };

    match serde_json::from_str::<LocationContext>(&response.content) {
        Ok(LocationContext {
            capital: Some(capital),
            country,
        }) => {
            tracing::info!(
                "Location context: {} ({})",
                capital,
                country.as_deref().unwrap_or("unknown country")
            );
            capital
        }
        Ok(_) => {
            tracing::warn!("Location reply had no capital, using fallback");
            FALLBACK_CAPITAL.to_string()
        }
        Err(e) => {
            tracing::warn!("Location reply was not valid JSON: {}", e);
            FALLBACK_CAPITAL.to_string()
        }
    }
}
