use crate::core::distance::lookup_bounding_box;
use crate::models::{AmenityCounts, AmenityKind, BoundingBox, ListingRecord, RankedListing};
use crate::services::PoiClient;
use std::sync::Arc;
use std::time::Duration;

/// Stage 3 of the pipeline: attach live amenity counts to each candidate.
///
/// The three category lookups for one candidate run concurrently and are
/// joined; candidates themselves are processed as an ordered stream with a
/// fixed spacing between lookup bursts, respecting the external service's
/// informal rate limits.
pub struct AmenityEnricher {
    poi: Arc<dyn PoiClient>,
    bbox_delta_deg: f64,
    throttle: Duration,
}

impl AmenityEnricher {
    pub fn new(poi: Arc<dyn PoiClient>, bbox_delta_deg: f64, throttle: Duration) -> Self {
        Self {
            poi,
            bbox_delta_deg,
            throttle,
        }
    }

    /// Enrich every candidate. Never fails: candidates without coordinates
    /// and failed lookups both end up with zero counts.
    pub async fn enrich(&self, listings: Vec<ListingRecord>) -> Vec<RankedListing> {
        let mut enriched = Vec::with_capacity(listings.len());
        let mut needs_spacing = false;

        for listing in listings {
            let counts = match listing.coordinates() {
                Some((lat, lon)) => {
                    if needs_spacing {
                        tokio::time::sleep(self.throttle).await;
                    }
                    needs_spacing = true;
                    self.lookup_counts(lat, lon).await
                }
                None => AmenityCounts::default(),
            };

            enriched.push(RankedListing::new(listing, counts));
        }

        enriched
    }

    async fn lookup_counts(&self, lat: f64, lon: f64) -> AmenityCounts {
        let bbox = lookup_bounding_box(lat, lon, self.bbox_delta_deg);

        let (schools, hospitals, restaurants) = tokio::join!(
            self.count_or_zero(bbox, AmenityKind::School),
            self.count_or_zero(bbox, AmenityKind::Hospital),
            self.count_or_zero(bbox, AmenityKind::Restaurant),
        );

        AmenityCounts {
            schools,
            hospitals,
            restaurants,
        }
    }

    /// Explicit default-on-failure mapping: one flaky category must never
    /// fail the candidate, let alone the request.
    async fn count_or_zero(&self, bbox: BoundingBox, kind: AmenityKind) -> u32 {
        match self.poi.count(bbox, kind).await {
            Ok(count) => count,
            Err(e) => {
                tracing::debug!("amenity lookup for {:?} failed: {}", kind, e);
                0
            }
        }
    }
}
