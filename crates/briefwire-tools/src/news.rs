//! News search against the News API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use briefwire_comms::{schema::property, Operation, OperationSchema};

use crate::error::{Result, ToolError};

const NEWSAPI_URL: &str = "https://newsapi.org/v2/everything";

/// Searches for the single most relevant news article on a topic
pub struct SearchNewsOperation {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchNewsParams {
    query: String,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsArticle {
    title: Option<String>,
    description: Option<String>,
    source: Option<NewsSource>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsSource {
    name: Option<String>,
}

impl SearchNewsOperation {
    /// Create a new news operation with an explicit key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a news operation from the `NEWSAPI_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("NEWSAPI_KEY")
            .map_err(|_| ToolError::MissingApiKey("NEWSAPI_KEY".to_string()))?;
        Ok(Self::new(api_key))
    }

    async fn fetch(&self, query: &str) -> Result<Value> {
        let response = self
            .client
            .get(NEWSAPI_URL)
            .query(&[
                ("q", query),
                ("apiKey", &self.api_key),
                ("pageSize", "1"),
                ("sortBy", "relevancy"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: NewsResponse = response.json().await?;

        let article = data
            .articles
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::api("No news articles found for the given query."))?;

        Ok(serde_json::json!({
            "headline": article.title,
            "description": article.description,
            "source": article.source.and_then(|s| s.name),
            "url": article.url,
            "published_date": article.published_at,
        }))
    }
}

#[async_trait]
impl Operation for SearchNewsOperation {
    fn name(&self) -> &str {
        "search_news"
    }

    fn description(&self) -> &str {
        "Search for news articles using the News API"
    }

    fn parameters_schema(&self) -> OperationSchema {
        OperationSchema::new()
            .with_description("Parameters for news search")
            .with_properties(serde_json::json!({
                "query": property("string", "The topic to search news for"),
            }))
            .with_required(vec!["query".to_string()])
    }

    async fn invoke(&self, args: Value) -> briefwire_comms::Result<Value> {
        let params: SearchNewsParams =
            serde_json::from_value(args).map_err(|e| ToolError::invalid_params(e.to_string()))?;

        tracing::debug!("Searching news for: {}", params.query);
        Ok(self.fetch(&params.query).await?)
    }
}
