use crate::core::distance::haversine_distance;
use crate::models::ListingRecord;
use crate::services::GeocodeClient;
use std::sync::Arc;

/// Postal areas are six digits with a nonzero leading digit.
pub fn is_valid_postal_area(postal_area: &str) -> bool {
    let bytes = postal_area.as_bytes();
    bytes.len() == 6
        && bytes[0] != b'0'
        && bytes.iter().all(|b| b.is_ascii_digit())
}

/// Stage 2 of the pipeline: optionally narrow the candidate set to a radius
/// around a geocoded postal area.
///
/// The filter fails open: a malformed postal area, a geocode outage, or an
/// unresolvable code all leave the candidate set untouched. An absent radius
/// constraint beats an empty result set caused by a transient failure.
pub struct GeoRadiusFilter {
    geocode: Arc<dyn GeocodeClient>,
    radius_km: f64,
}

impl GeoRadiusFilter {
    pub fn new(geocode: Arc<dyn GeocodeClient>, radius_km: f64) -> Self {
        Self { geocode, radius_km }
    }

    pub async fn apply(
        &self,
        postal_area: &str,
        candidates: Vec<ListingRecord>,
    ) -> Vec<ListingRecord> {
        if !is_valid_postal_area(postal_area) {
            tracing::debug!("ignoring malformed postal area {:?}", postal_area);
            return candidates;
        }

        let center = match self.geocode.resolve(postal_area).await {
            Ok(Some(point)) => point,
            Ok(None) => {
                tracing::warn!(
                    "postal area {} did not resolve, skipping radius filter",
                    postal_area
                );
                return candidates;
            }
            Err(e) => {
                tracing::warn!(
                    "geocode lookup for {} failed ({}), skipping radius filter",
                    postal_area,
                    e
                );
                return candidates;
            }
        };

        let before = candidates.len();
        let retained: Vec<ListingRecord> = candidates
            .into_iter()
            .filter(|listing| match listing.coordinates() {
                // Boundary is inclusive: a listing at exactly the radius stays.
                Some((lat, lon)) => {
                    haversine_distance(center.lat, center.lon, lat, lon) <= self.radius_km
                }
                // Listings without coordinates cannot satisfy an active radius.
                None => false,
            })
            .collect();

        tracing::debug!(
            "radius filter around {} retained {} of {} candidates",
            postal_area,
            retained.len(),
            before
        );

        retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, LocationDescriptor};
    use crate::services::GeocodeError;
    use async_trait::async_trait;
    use uuid::Uuid;

    struct FakeGeocode {
        answer: Option<GeoPoint>,
        fail: bool,
    }

    #[async_trait]
    impl GeocodeClient for FakeGeocode {
        async fn resolve(&self, _postal_area: &str) -> Result<Option<GeoPoint>, GeocodeError> {
            if self.fail {
                return Err(GeocodeError::ApiError("service unavailable".to_string()));
            }
            Ok(self.answer)
        }
    }

    fn listing_at(lat: Option<f64>, lon: Option<f64>) -> ListingRecord {
        ListingRecord {
            id: Uuid::new_v4(),
            title: "Test flat".to_string(),
            price: 3_500_000,
            bedrooms: Some(2),
            location: LocationDescriptor::Flat("Kolkata".to_string()),
            latitude: lat,
            longitude: lon,
            created_at: None,
        }
    }

    // Center used by the fake geocoder: central Kolkata.
    const CENTER: GeoPoint = GeoPoint {
        lat: 22.5726,
        lon: 88.3639,
    };

    fn filter_with(answer: Option<GeoPoint>, fail: bool) -> GeoRadiusFilter {
        GeoRadiusFilter::new(Arc::new(FakeGeocode { answer, fail }), 10.0)
    }

    #[test]
    fn test_postal_area_format() {
        assert!(is_valid_postal_area("700001"));
        assert!(is_valid_postal_area("999999"));
        assert!(!is_valid_postal_area("070001")); // leading zero
        assert!(!is_valid_postal_area("70001")); // too short
        assert!(!is_valid_postal_area("7000011")); // too long
        assert!(!is_valid_postal_area("70000a")); // non-digit
        assert!(!is_valid_postal_area(""));
    }

    #[tokio::test]
    async fn test_near_retained_far_dropped() {
        // ~3 km north vs ~15 km north of the center (1 deg lat ~ 111 km).
        let near = listing_at(Some(CENTER.lat + 0.027), Some(CENTER.lon));
        let far = listing_at(Some(CENTER.lat + 0.135), Some(CENTER.lon));

        let filter = filter_with(Some(CENTER), false);
        let result = filter.apply("700001", vec![near.clone(), far]).await;

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, near.id);
    }

    #[tokio::test]
    async fn test_boundary_is_inclusive() {
        // ~9.99 km and ~10.05 km north of the center.
        let just_inside = listing_at(Some(CENTER.lat + 0.08985), Some(CENTER.lon));
        let just_outside = listing_at(Some(CENTER.lat + 0.0904), Some(CENTER.lon));

        let filter = filter_with(Some(CENTER), false);
        let result = filter
            .apply("700001", vec![just_inside.clone(), just_outside])
            .await;

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, just_inside.id);
    }

    #[tokio::test]
    async fn test_missing_coordinates_dropped_when_active() {
        let with_coords = listing_at(Some(CENTER.lat), Some(CENTER.lon));
        let without = listing_at(None, None);

        let filter = filter_with(Some(CENTER), false);
        let result = filter.apply("700001", vec![with_coords, without]).await;

        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_postal_area_is_noop() {
        let candidates = vec![listing_at(None, None), listing_at(Some(50.0), Some(50.0))];

        let filter = filter_with(Some(CENTER), false);
        let result = filter.apply("70001", candidates.clone()).await;

        assert_eq!(result.len(), candidates.len());
    }

    #[tokio::test]
    async fn test_unresolved_postal_area_fails_open() {
        let candidates = vec![listing_at(Some(50.0), Some(50.0))];

        let filter = filter_with(None, false);
        let result = filter.apply("700001", candidates.clone()).await;

        assert_eq!(result.len(), candidates.len());
    }

    #[tokio::test]
    async fn test_geocode_outage_fails_open() {
        let candidates = vec![listing_at(Some(50.0), Some(50.0))];

        let filter = filter_with(None, true);
        let result = filter.apply("700001", candidates.clone()).await;

        assert_eq!(result.len(), candidates.len());
    }
}
