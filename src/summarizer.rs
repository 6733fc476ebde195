use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::data_models::{Document, SummaryResult};
use crate::error::{LlmError, SummaryParseError};
use crate::search::preview;

pub const EXPECTED_RESULTS: usize = 5;

pub const SYSTEM_PROMPT: &str = r#"You are a helpful assistant that summarizes search results into JSON format.
You must return ONLY valid JSON (no markdown, no extra text) in the following structure:
{
  "results": [
    {
      "rank": 1,
      "title": "...",
      "url": "...",
      "summary": "..."
    }
  ]
}

Extract the top 5 search results from the provided content and create a concise summary for each.
Return ONLY the JSON object, nothing else."#;

pub fn user_prompt(text: &str) -> String {
    format!(
        "Extract and summarize the top 5 search results from the following content into JSON format:\n\n{text}"
    )
}

/// A chat-completion backend: one system message, one user message, text back.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client.
pub struct OpenAiChatModel {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiChatModel {
    pub fn new(base_url: &str, api_key: &str, model: &str, temperature: f32, max_tokens: u32) -> Self {
        OpenAiChatModel {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature,
            max_tokens,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.llm_api_base,
            &config.llm_api_key,
            &config.model_name,
            config.temperature,
            config.max_tokens,
        )
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {status}: {body}")));
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::Parse("response contained no message content".to_string()))
    }
}

#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn ChatModel>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn ChatModel>) -> Summarizer {
        Summarizer { model }
    }

    /// Ask the model for a JSON summary of the documents. The response text is
    /// returned exactly as the model produced it.
    pub async fn summarize(&self, docs: &[Document]) -> Result<String, LlmError> {
        tracing::info!("summarization initiated for {} document(s)", docs.len());

        let combined = docs
            .iter()
            .map(|d| d.page_content.as_str())
            .collect::<Vec<&str>>()
            .join("\n\n");
        tracing::debug!("combined text length: {} characters", combined.len());

        let summary = self
            .model
            .complete(SYSTEM_PROMPT, &user_prompt(&combined))
            .await?;

        tracing::info!("JSON summarization completed: {} characters", summary.len());
        tracing::debug!("summary preview: {}...", preview(&summary, 150));
        Ok(summary)
    }
}

/// Validate the model output against [`SummaryResult`].
///
/// The entry count is not enforced; a count other than five is only logged.
pub fn parse_summary(raw: &str) -> Result<SummaryResult, SummaryParseError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(SummaryParseError::InvalidJson)?;
    let result: SummaryResult =
        serde_json::from_value(value).map_err(SummaryParseError::Schema)?;

    if result.results.len() != EXPECTED_RESULTS {
        tracing::warn!(
            "summary contains {} results, expected {}",
            result.results.len(),
            EXPECTED_RESULTS
        );
    }
    Ok(result)
}
