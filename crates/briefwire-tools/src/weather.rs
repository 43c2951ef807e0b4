//! Current weather against the OpenWeather API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use briefwire_comms::{schema::property, Operation, OperationSchema};

use crate::error::{Result, ToolError};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

fn default_units() -> String {
    "metric".to_string()
}

/// Fetches current weather conditions for a city
pub struct GetWeatherOperation {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GetWeatherParams {
    city: String,
    #[serde(default = "default_units")]
    units: String,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: Option<WeatherMain>,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
    name: Option<String>,
    sys: Option<WeatherSys>,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeatherSys {
    country: Option<String>,
}

impl GetWeatherOperation {
    /// Create a new weather operation with an explicit key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a weather operation from the `OPENWEATHER_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENWEATHER_API_KEY")
            .map_err(|_| ToolError::MissingApiKey("OPENWEATHER_API_KEY".to_string()))?;
        Ok(Self::new(api_key))
    }

    async fn fetch(&self, city: &str, units: &str) -> Result<Value> {
        let response = self
            .client
            .get(OPENWEATHER_URL)
            .query(&[("q", city), ("appid", &self.api_key), ("units", units)])
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                return Err(ToolError::api(
                    "Invalid OpenWeather API Key (401 Unauthorized).",
                ));
            }
            StatusCode::NOT_FOUND => {
                return Err(ToolError::api(format!(
                    "City '{}' not found (404 Not Found).",
                    city
                )));
            }
            _ => {}
        }

        let data: WeatherResponse = response.error_for_status()?.json().await?;

        let description = data
            .weather
            .first()
            .and_then(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let main = data.main.unwrap_or(WeatherMain {
            temp: None,
            humidity: None,
        });

        Ok(serde_json::json!({
            "temperature": main.temp,
            "humidity": main.humidity,
            "description": description,
            "city": data.name,
            "country": data.sys.and_then(|s| s.country),
        }))
    }
}

#[async_trait]
impl Operation for GetWeatherOperation {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather for a city"
    }

    fn parameters_schema(&self) -> OperationSchema {
        OperationSchema::new()
            .with_description("Parameters for weather lookup")
            .with_properties(serde_json::json!({
                "city": property("string", "City name to look up"),
                "units": property("string", "Unit system, metric or imperial"),
            }))
            .with_required(vec!["city".to_string()])
    }

    async fn invoke(&self, args: Value) -> briefwire_comms::Result<Value> {
        let params: GetWeatherParams =
            serde_json::from_value(args).map_err(|e| ToolError::invalid_params(e.to_string()))?;

        tracing::debug!("Fetching weather for {} in {}", params.city, params.units);
        Ok(self.fetch(&params.city, &params.units).await?)
    }
}
