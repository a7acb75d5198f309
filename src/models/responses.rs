use crate::models::domain::RankedListing;
use serde::{Deserialize, Serialize};

/// Response for the match listings endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListingsResponse {
    pub matches: Vec<RankedListing>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
