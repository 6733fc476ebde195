use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

/// Failure talking to the web-search provider.
#[derive(Debug, Error)]
#[error("Error performing search: {message}")]
pub struct SearchError {
    pub message: String,
}

impl SearchError {
    pub fn new(message: impl Into<String>) -> SearchError {
        SearchError {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::new(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM connection error: {0}")]
    Connection(String),

    #[error("LLM API error: {0}")]
    Api(String),

    #[error("LLM response parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum SummaryParseError {
    #[error("summary is not valid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("summary does not match the expected schema: {0}")]
    Schema(serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error(transparent)]
    SearchUnavailable(#[from] SearchError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("research agent returned {status}: {detail}")]
    Status { status: u16, detail: String },
}
