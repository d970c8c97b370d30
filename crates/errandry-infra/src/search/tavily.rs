//! TavilyClient -- concrete [`WebSearcher`] implementation for Tavily.
//!
//! Sends requests to the Tavily search API (`/search`) with bearer
//! authentication. Hits come back in provider order and are passed through
//! unchanged; the search node does the folding.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use errandry_core::port::WebSearcher;
use errandry_types::search::{SearchError, SearchHit};

/// Request body for the Tavily search API.
#[derive(Debug, Clone, Serialize)]
struct TavilyRequest {
    query: String,
    max_results: usize,
}

/// Response body from the Tavily search API.
#[derive(Debug, Clone, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

/// One result in a Tavily response.
#[derive(Debug, Clone, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// Tavily web search client.
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl TavilyClient {
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.tavily.com".to_string(),
        }
    }

    /// Override the API origin (tests, proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// No Debug derive; the SecretString must stay out of formatted output.

impl WebSearcher for TavilyClient {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let body = TavilyRequest {
            query: query.to_string(),
            max_results,
        };
        let url = self.url("/search");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => SearchError::AuthenticationFailed,
                422 => SearchError::InvalidQuery(error_body),
                429 => SearchError::RateLimited,
                _ => SearchError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let tavily_resp: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(tavily_resp
            .results
            .into_iter()
            .map(|r| SearchHit {
                title: r.title,
                url: r.url,
                content: r.content,
            })
            .collect())
    }
}
