#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use research_agent::agent::ResearchAgent;
use research_agent::data_models::SearchResultItem;
use research_agent::error::{LlmError, SearchError};
use research_agent::search::{SearchClient, SearchProvider};
use research_agent::summarizer::{ChatModel, Summarizer};

pub const ONE_RESULT_JSON: &str =
    r#"{"results":[{"rank":1,"title":"A","url":"http://a","summary":"s"}]}"#;

pub struct StubSearch {
    pub calls: AtomicUsize,
    pub results: Result<Vec<SearchResultItem>, String>,
}

impl StubSearch {
    pub fn with_results(results: Vec<SearchResultItem>) -> Arc<StubSearch> {
        Arc::new(StubSearch {
            calls: AtomicUsize::new(0),
            results: Ok(results),
        })
    }

    pub fn failing(message: &str) -> Arc<StubSearch> {
        Arc::new(StubSearch {
            calls: AtomicUsize::new(0),
            results: Err(message.to_string()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn organic_results(&self, _query: &str) -> Result<Vec<SearchResultItem>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results.clone().map_err(SearchError::new)
    }
}

pub struct StubModel {
    pub prompts: Mutex<Vec<String>>,
    pub reply: Result<String, String>,
}

impl StubModel {
    pub fn replying(reply: &str) -> Arc<StubModel> {
        Arc::new(StubModel {
            prompts: Mutex::new(Vec::new()),
            reply: Ok(reply.to_string()),
        })
    }

    pub fn failing(message: &str) -> Arc<StubModel> {
        Arc::new(StubModel {
            prompts: Mutex::new(Vec::new()),
            reply: Err(message.to_string()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for StubModel {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(user.to_string());
        self.reply.clone().map_err(LlmError::Api)
    }
}

pub fn three_results() -> Vec<SearchResultItem> {
    vec![
        SearchResultItem::new("PyTorch", "https://pytorch.org", "Tensors and dynamic nets"),
        SearchResultItem::new("TensorFlow", "https://tensorflow.org", "End-to-end ML platform"),
        SearchResultItem::new("scikit-learn", "https://scikit-learn.org", "ML in Python"),
    ]
}

pub fn agent(search: Arc<StubSearch>, model: Arc<StubModel>) -> ResearchAgent {
    ResearchAgent::new(SearchClient::new(search), Summarizer::new(model))
}
