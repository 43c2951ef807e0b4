//! Foreign exchange rates against the ExchangeRate API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use briefwire_comms::{schema::property, Operation, OperationSchema};

use crate::error::{Result, ToolError};

const EXCHANGE_RATE_API_BASE: &str = "https://v6.exchangerate-api.com/v6";

/// Map a location name to its ISO currency code
///
/// Unknown locations fall back to USD.
pub fn currency_code(location: &str) -> &'static str {
    match location.trim().to_lowercase().as_str() {
        "usa" | "united states" => "USD",
        "uk" | "united kingdom" | "london" => "GBP",
        "europe" | "germany" | "france" => "EUR",
        "japan" | "tokyo" => "JPY",
        "canada" => "CAD",
        "australia" => "AUD",
        "india" => "INR",
        "china" => "CNY",
        "nigeria" | "lagos" => "NGN",
        _ => "USD",
    }
}

/// Fetches the USD exchange rate for the currency of a location
pub struct GetFxRateOperation {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GetFxRateParams {
    location: String,
}

#[derive(Debug, Deserialize)]
struct FxResponse {
    result: Option<String>,
    conversion_rate: Option<f64>,
    time_last_update_utc: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

impl GetFxRateOperation {
    /// Create a new FX operation with an explicit key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create an FX operation from the `EXCHANGE_RATE_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("EXCHANGE_RATE_API_KEY")
            .map_err(|_| ToolError::MissingApiKey("EXCHANGE_RATE_API_KEY".to_string()))?;
        Ok(Self::new(api_key))
    }

    async fn fetch(&self, location: &str) -> Result<Value> {
        let target = currency_code(location);
        let url = format!(
            "{}/{}/pair/USD/{}",
            EXCHANGE_RATE_API_BASE, self.api_key, target
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ToolError::api(format!(
                "Failed to fetch exchange rate. API returned status code {}.",
                response.status().as_u16()
            )));
        }

        let data: FxResponse = response.json().await?;

        if data.result.as_deref() != Some("success") {
            return Err(ToolError::api(format!(
                "API returned an unsuccessful result: {}",
                data.error_type.as_deref().unwrap_or("Unknown error")
            )));
        }

        Ok(serde_json::json!({
            "base_code": "USD",
            "target_code": target,
            "conversion_rate": data.conversion_rate,
            "last_update": data.time_last_update_utc,
            "location_queried": location,
        }))
    }
}

#[async_trait]
impl Operation for GetFxRateOperation {
    fn name(&self) -> &str {
        "get_fx_rate"
    }

    fn description(&self) -> &str {
        "Fetch the foreign exchange rate for a location's currency relative to USD"
    }

    fn parameters_schema(&self) -> OperationSchema {
        OperationSchema::new()
            .with_description("Parameters for exchange rate lookup")
            .with_properties(serde_json::json!({
                "location": property("string", "Country or city whose currency to quote"),
            }))
            .with_required(vec!["location".to_string()])
    }

    async fn invoke(&self, args: Value) -> briefwire_comms::Result<Value> {
        let params: GetFxRateParams =
            serde_json::from_value(args).map_err(|e| ToolError::invalid_params(e.to_string()))?;

        tracing::debug!("Fetching FX rate for location: {}", params.location);
        Ok(self.fetch(&params.location).await?)
    }
}
