use crate::models::{AmenityKind, BoundingBox};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when counting points of interest
#[derive(Debug, Error)]
pub enum PoiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Point-of-interest counting interface.
#[async_trait]
pub trait PoiClient: Send + Sync {
    /// Count amenities of one kind inside a bounding box.
    async fn count(&self, bbox: BoundingBox, kind: AmenityKind) -> Result<u32, PoiError>;
}

/// Overpass-style POI client.
///
/// Sends a plain-text query and counts the returned elements. The service is
/// informally rate-limited, so callers space their requests; this client
/// only enforces the per-request timeout.
pub struct OverpassClient {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct OverpassReply {
    #[serde(default)]
    elements: Vec<serde_json::Value>,
}

impl OverpassClient {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { endpoint, client }
    }

    fn build_query(bbox: BoundingBox, kind: AmenityKind) -> String {
        format!(
            "[out:json];\nnode[\"amenity\"=\"{}\"]({},{},{},{});\nout body;",
            kind.tag(),
            bbox.min_lat,
            bbox.min_lon,
            bbox.max_lat,
            bbox.max_lon,
        )
    }
}

#[async_trait]
impl PoiClient for OverpassClient {
    async fn count(&self, bbox: BoundingBox, kind: AmenityKind) -> Result<u32, PoiError> {
        let query = Self::build_query(bbox, kind);

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PoiError::ApiError(format!(
                "amenity lookup failed: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let reply: OverpassReply = serde_json::from_str(&body)
            .map_err(|e| PoiError::InvalidResponse(e.to_string()))?;

        Ok(reply.elements.len() as u32)
    }
}
