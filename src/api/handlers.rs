use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::agent::ResearchAgent;
use crate::error::{ResearchError, SummaryParseError};
use crate::summarizer::parse_summary;

use super::models::{ErrorResponse, HealthStatus, ResearchRequest, ResearchResponse, ServiceInfo};

pub const SERVICE_NAME: &str = "Research Agent API";

/// Error body `{detail}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> ApiError {
        ApiError {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

impl From<ResearchError> for ApiError {
    fn from(e: ResearchError) -> Self {
        match e {
            ResearchError::SearchUnavailable(e) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ResearchError::Llm(e) => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl From<SummaryParseError> for ApiError {
    fn from(e: SummaryParseError) -> Self {
        let detail = match e {
            SummaryParseError::InvalidJson(_) => "Failed to parse research results",
            SummaryParseError::Schema(_) => "Research results did not match the expected schema",
        };
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

pub async fn research_handler(
    State(agent): State<Arc<ResearchAgent>>,
    request: Result<Json<ResearchRequest>, JsonRejection>,
) -> Result<Json<ResearchResponse>, ApiError> {
    let Json(request) = request.map_err(|rejection| {
        tracing::warn!("rejected research request body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;
    tracing::info!("API request received for query: '{}'", request.query);

    if request.query.trim().is_empty() {
        tracing::warn!("empty query received");
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Query cannot be empty"));
    }

    let raw = agent.research(&request.query).await.map_err(|e| {
        tracing::error!("API error: {e}");
        ApiError::from(e)
    })?;

    let data = parse_summary(&raw).map_err(|e| {
        tracing::error!("invalid summary returned from research agent: {e}");
        tracing::debug!("unparseable summary: {raw}");
        ApiError::from(e)
    })?;

    tracing::info!("API request completed successfully");
    Ok(Json(ResearchResponse {
        status: "success".to_string(),
        data,
    }))
}
