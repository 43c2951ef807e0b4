//! Image search against the Pexels API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use briefwire_comms::{schema::property, Operation, OperationSchema};

use crate::error::{Result, ToolError};

const PEXELS_SEARCH_URL: &str = "https://api.pexels.com/v1/search";

fn default_count() -> u32 {
    1
}

/// Searches for stock photos matching a query
pub struct SearchImagesOperation {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchImagesParams {
    query: String,
    #[serde(default = "default_count")]
    count: u32,
}

#[derive(Debug, Deserialize)]
struct PexelsResponse {
    total_results: Option<u64>,
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: Option<u64>,
    width: Option<u32>,
    height: Option<u32>,
    url: Option<String>,
    photographer: Option<String>,
    src: Option<PexelsPhotoSrc>,
    alt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhotoSrc {
    large: Option<String>,
}

impl SearchImagesOperation {
    /// Create a new image search operation with an explicit key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create an image search operation from the `PEXELS_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("PEXELS_API_KEY")
            .map_err(|_| ToolError::MissingApiKey("PEXELS_API_KEY".to_string()))?;
        Ok(Self::new(api_key))
    }

    async fn fetch(&self, query: &str, count: u32) -> Result<Value> {
        let response = self
            .client
            .get(PEXELS_SEARCH_URL)
            .header("Authorization", &self.api_key)
            .query(&[("query", query), ("per_page", &count.to_string())])
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ToolError::api("Unauthorized: Invalid Pexels API Key."));
        }

        let data: PexelsResponse = response.error_for_status()?.json().await?;

        let images: Vec<Value> = data
            .photos
            .into_iter()
            .map(|photo| {
                serde_json::json!({
                    "id": photo.id,
                    "width": photo.width,
                    "height": photo.height,
                    "url": photo.url,
                    "photographer": photo.photographer,
                    "src": photo.src.and_then(|s| s.large),
                    "alt": photo.alt,
                })
            })
            .collect();

        Ok(serde_json::json!({
            "query": query,
            "total_results": data.total_results,
            "images": images,
        }))
    }
}

#[async_trait]
impl Operation for SearchImagesOperation {
    fn name(&self) -> &str {
        "search_images"
    }

    fn description(&self) -> &str {
        "Search for high-quality images using the Pexels API"
    }

    fn parameters_schema(&self) -> OperationSchema {
        OperationSchema::new()
            .with_description("Parameters for image search")
            .with_properties(serde_json::json!({
                "query": property("string", "What the images should show"),
                "count": property("integer", "How many images to return"),
            }))
            .with_required(vec!["query".to_string()])
    }

    async fn invoke(&self, args: Value) -> briefwire_comms::Result<Value> {
        let params: SearchImagesParams =
            serde_json::from_value(args).map_err(|e| ToolError::invalid_params(e.to_string()))?;

        tracing::debug!("Searching {} images for: {}", params.count, params.query);
        Ok(self.fetch(&params.query, params.count).await?)
    }
}
