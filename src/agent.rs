use std::sync::Arc;

use crate::config::Config;
use crate::data_models::Document;
use crate::error::ResearchError;
use crate::search::{SearchClient, SerpApiProvider};
use crate::summarizer::{OpenAiChatModel, Summarizer};

/// Runs a query through web search and then the summarizer.
pub struct ResearchAgent {
    search: SearchClient,
    summarizer: Summarizer,
}

impl ResearchAgent {
    pub fn new(search: SearchClient, summarizer: Summarizer) -> ResearchAgent {
        ResearchAgent { search, summarizer }
    }

    /// Wire up the SerpAPI and chat-completion clients described by `config`.
    pub fn from_config(config: &Config) -> ResearchAgent {
        let provider = SerpApiProvider::new(&config.serpapi_base_url, &config.serpapi_api_key);
        let model = OpenAiChatModel::from_config(config);
        ResearchAgent::new(
            SearchClient::new(Arc::new(provider)),
            Summarizer::new(Arc::new(model)),
        )
    }

    pub async fn research(&self, query: &str) -> Result<String, ResearchError> {
        tracing::info!("research started for query: '{query}'");

        let search_results = self.search.search(query).await?;
        tracing::info!(
            "search completed: {} characters retrieved",
            search_results.len()
        );

        let docs = [Document::new(search_results)];
        let summary = self.summarizer.summarize(&docs).await?;

        tracing::info!("research completed for query: '{query}'");
        Ok(summary)
    }
}
