use crate::models::GeoPoint;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when resolving a postal area
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Postal-area geocoding interface.
#[async_trait]
pub trait GeocodeClient: Send + Sync {
    /// Resolve a postal area to coordinates. `Ok(None)` means the service
    /// answered but has no result for the query.
    async fn resolve(&self, postal_area: &str) -> Result<Option<GeoPoint>, GeocodeError>;
}

/// Nominatim-style geocoding client.
///
/// One request per match at most; the radius filter fails open when this
/// lookup is unavailable, so no retry logic lives here.
pub struct NominatimClient {
    base_url: String,
    country: String,
    client: Client,
}

/// Nominatim returns lat/lon as JSON strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimClient {
    pub fn new(base_url: String, country: String, user_agent: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            country,
            client,
        }
    }
}

#[async_trait]
impl GeocodeClient for NominatimClient {
    async fn resolve(&self, postal_area: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        let url = format!(
            "{}/search?format=json&postalcode={}&country={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(postal_area),
            urlencoding::encode(&self.country),
        );

        tracing::debug!("resolving postal area {} via {}", postal_area, url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "geocode lookup failed: {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await?;

        let Some(place) = places.first() else {
            return Ok(None);
        };

        let lat = place
            .lat
            .parse::<f64>()
            .map_err(|_| GeocodeError::InvalidResponse(format!("bad latitude: {}", place.lat)))?;
        let lon = place
            .lon
            .parse::<f64>()
            .map_err(|_| GeocodeError::InvalidResponse(format!("bad longitude: {}", place.lon)))?;

        Ok(Some(GeoPoint { lat, lon }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> NominatimClient {
        NominatimClient::new(
            server.url(),
            "India".to_string(),
            "roost-algo-tests".to_string(),
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"lat": "22.5726", "lon": "88.3639"}]"#)
            .create_async()
            .await;

        let point = client_for(&server).resolve("700001").await.unwrap();
        let point = point.expect("should resolve");
        assert!((point.lat - 22.5726).abs() < 1e-9);
        assert!((point.lon - 88.3639).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_resolve_no_results() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let point = client_for(&server).resolve("999999").await.unwrap();
        assert!(point.is_none());
    }

    #[tokio::test]
    async fn test_resolve_malformed_coordinates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"lat": "not-a-number", "lon": "88.0"}]"#)
            .create_async()
            .await;

        let result = client_for(&server).resolve("700001").await;
        assert!(matches!(result, Err(GeocodeError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_resolve_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let result = client_for(&server).resolve("700001").await;
        assert!(matches!(result, Err(GeocodeError::ApiError(_))));
    }
}
