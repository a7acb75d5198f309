use crate::core::{
    enrich::AmenityEnricher, radius::GeoRadiusFilter, scoring, selector::CandidateSelector,
};
use crate::models::{MatchListingsRequest, RankedListing};
use crate::services::{GeocodeClient, ListingStore, PoiClient, StoreError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

/// Failures that abort a match request. Everything else in the pipeline
/// degrades to defaults instead of surfacing here.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("listing store query failed: {0}")]
    Store(#[from] StoreError),
}

/// Tunable pipeline parameters with the values the matching behavior was
/// originally tuned with as defaults.
#[derive(Debug, Clone, Copy)]
pub struct EngineParams {
    /// Absolute premium over budget accepted by the price band.
    pub price_band_offset: i64,
    /// Radius around a resolved postal area.
    pub radius_km: f64,
    /// Half-size of the amenity lookup bounding box, in degrees.
    pub bbox_delta_deg: f64,
    /// Minimum spacing between successive candidates' lookup bursts.
    pub throttle_ms: u64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            price_band_offset: 3_000_000,
            radius_km: 10.0,
            bbox_delta_deg: 0.01,
            throttle_ms: 200,
        }
    }
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Candidate selection (price band, bedrooms, location fallback)
/// 2. Optional geographic radius filter
/// 3. Concurrent amenity enrichment
/// 4. Scoring, normalization, and ranking
pub struct MatchEngine {
    selector: CandidateSelector,
    radius: GeoRadiusFilter,
    enricher: AmenityEnricher,
}

impl MatchEngine {
    pub fn new(
        store: Arc<dyn ListingStore>,
        geocode: Arc<dyn GeocodeClient>,
        poi: Arc<dyn PoiClient>,
        params: EngineParams,
    ) -> Self {
        Self {
            selector: CandidateSelector::new(store, params.price_band_offset),
            radius: GeoRadiusFilter::new(geocode, params.radius_km),
            enricher: AmenityEnricher::new(
                poi,
                params.bbox_delta_deg,
                Duration::from_millis(params.throttle_ms),
            ),
        }
    }

    /// Run the full matching pipeline for one request.
    ///
    /// Only validation and store failures abort. An empty vector is a valid
    /// "no matches" outcome, distinct from any error.
    pub async fn match_listings(
        &self,
        request: &MatchListingsRequest,
    ) -> Result<Vec<RankedListing>, MatchError> {
        request
            .validate()
            .map_err(|e| MatchError::Validation(e.to_string()))?;

        let candidates = self
            .selector
            .select(request.budget, request.preferred_bedrooms, &request.location)
            .await?;

        tracing::debug!(
            "selected {} candidates for {:?}",
            candidates.len(),
            request.location
        );

        let candidates = match request.postal_area.as_deref() {
            Some(postal_area) => self.radius.apply(postal_area, candidates).await,
            None => candidates,
        };

        let enriched = self.enricher.enrich(candidates).await;

        Ok(scoring::score_and_rank(enriched, &request.weights()))
    }
}
