use serde::{Deserialize, Serialize};

use crate::data_models::SummaryResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub status: String,
    pub data: SummaryResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}
