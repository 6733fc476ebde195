use reqwest::Client;
use std::time::Duration;

use crate::api::models::{ErrorResponse, ResearchRequest, ResearchResponse};
use crate::data_models::SummaryEntry;
use crate::error::ClientError;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const RESEARCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for a running research agent API.
pub struct ResearchApiClient {
    client: Client,
    base_url: String,
}

impl ResearchApiClient {
    pub fn new(base_url: &str) -> ResearchApiClient {
        ResearchApiClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn research(&self, query: &str) -> Result<ResearchResponse, ClientError> {
        let url = format!("{}/research", self.base_url);
        let resp = self
            .client
            .post(&url)
            .timeout(RESEARCH_TIMEOUT)
            .json(&ResearchRequest {
                query: query.to_string(),
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(resp.json().await?)
    }

    /// All summarized results, or an empty list if the call failed.
    pub async fn all_results(&self, query: &str) -> Vec<SummaryEntry> {
        match self.research(query).await {
            Ok(resp) if resp.status == "success" => resp.data.results,
            Ok(resp) => {
                tracing::warn!("research agent returned status {}", resp.status);
                Vec::new()
            }
            Err(e) => {
                tracing::error!("error calling research agent: {e}");
                Vec::new()
            }
        }
    }

    pub async fn top_result(&self, query: &str) -> Option<SummaryEntry> {
        self.all_results(query).await.into_iter().next()
    }
}
