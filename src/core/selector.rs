use crate::models::{ListingFilter, ListingRecord, LocationMatch};
use crate::services::{ListingStore, StoreError};
use std::sync::Arc;

/// Stage 1 of the pipeline: build the filter predicate and query the store.
///
/// The price band is `[budget, budget + offset)` with a fixed absolute
/// offset, bounding listings to a reasonable premium over budget.
pub struct CandidateSelector {
    store: Arc<dyn ListingStore>,
    price_band_offset: i64,
}

impl CandidateSelector {
    pub fn new(store: Arc<dyn ListingStore>, price_band_offset: i64) -> Self {
        Self {
            store,
            price_band_offset,
        }
    }

    /// Select candidate listings for a budget, optional bedroom count, and
    /// location query.
    ///
    /// Location matching is two-tier: the structured locality/city fields are
    /// tried first, and only if they match nothing does the query fall back
    /// to the flat display field. Upstream rows carry one form or the other,
    /// so a single-strategy filter would silently miss a large fraction of
    /// the store.
    pub async fn select(
        &self,
        budget: f64,
        preferred_bedrooms: Option<i32>,
        location: &str,
    ) -> Result<Vec<ListingRecord>, StoreError> {
        let min_price = budget as i64;
        let max_price = min_price + self.price_band_offset;
        let bedrooms = preferred_bedrooms.filter(|b| *b > 0);

        let structured = ListingFilter {
            min_price,
            max_price,
            bedrooms,
            location: Some(LocationMatch::Structured(location.to_string())),
        };

        let listings = self.store.find(&structured).await?;
        if !listings.is_empty() {
            return Ok(listings);
        }

        tracing::debug!(
            "no structured location match for {:?}, falling back to flat field",
            location
        );

        let flat = ListingFilter {
            location: Some(LocationMatch::Flat(location.to_string())),
            ..structured
        };
        self.store.find(&flat).await
    }
}
