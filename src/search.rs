use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::data_models::SearchResultItem;
use crate::error::SearchError;

pub const MAX_RESULTS: usize = 10;
pub const NO_RESULTS: &str = "No results found for the query.";

/// A web-search backend returning organic results in provider rank order.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn organic_results(&self, query: &str) -> Result<Vec<SearchResultItem>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    search_metadata: Option<SearchMetadata>,
    #[serde(default)]
    organic_results: Vec<SearchResultItem>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchMetadata {
    #[serde(default)]
    status: Option<String>,
}

impl SerpApiResponse {
    /// SerpAPI sets `error` on successful searches too, e.g. when Google
    /// returned nothing. It is only a failure when the search did not succeed.
    fn failure(&self) -> Option<&str> {
        let succeeded = self
            .search_metadata
            .as_ref()
            .and_then(|m| m.status.as_deref())
            == Some("Success");
        match &self.error {
            Some(e) if !succeeded => Some(e.as_str()),
            _ => None,
        }
    }
}

/// SerpAPI client using the Google engine.
pub struct SerpApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SerpApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> SerpApiProvider {
        SerpApiProvider {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    async fn organic_results(&self, query: &str) -> Result<Vec<SearchResultItem>, SearchError> {
        let url = format!("{}/search.json", self.base_url);
        let res = self
            .client
            .get(&url)
            .query(&[("engine", "google"), ("q", query), ("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        let parsed: Result<SerpApiResponse, _> = serde_json::from_str(&body);

        match parsed {
            Ok(response) if !status.is_success() => Err(SearchError::new(
                response
                    .error
                    .unwrap_or_else(|| format!("HTTP {status}")),
            )),
            Ok(response) => {
                if let Some(e) = response.failure() {
                    return Err(SearchError::new(e));
                }
                Ok(response.organic_results)
            }
            Err(_) if !status.is_success() => Err(SearchError::new(format!("HTTP {status}"))),
            Err(e) => Err(SearchError::new(format!("invalid response body: {e}"))),
        }
    }
}

/// Turns provider results into the numbered text blob fed to the summarizer.
#[derive(Clone)]
pub struct SearchClient {
    provider: Arc<dyn SearchProvider>,
}

impl SearchClient {
    pub fn new(provider: Arc<dyn SearchProvider>) -> SearchClient {
        SearchClient { provider }
    }

    pub async fn search(&self, query: &str) -> Result<String, SearchError> {
        tracing::info!("web search initiated for query: '{query}'");

        let results = self.provider.organic_results(query).await.map_err(|e| {
            tracing::error!("{e}");
            e
        })?;

        if results.is_empty() {
            tracing::warn!("no results found for the query");
            return Ok(NO_RESULTS.to_string());
        }

        let text = format_results(&results);
        tracing::info!(
            "web search completed: found {} results",
            results.len().min(MAX_RESULTS)
        );
        tracing::debug!("search results: {}", preview(&text, 200));
        Ok(text)
    }
}

pub fn format_results(results: &[SearchResultItem]) -> String {
    results
        .iter()
        .take(MAX_RESULTS)
        .enumerate()
        .map(|(i, item)| item.format(i + 1))
        .collect::<Vec<String>>()
        .join("\n")
}

pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
