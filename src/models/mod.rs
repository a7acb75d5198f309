// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AmenityCounts, AmenityKind, BoundingBox, GeoPoint, ListingFilter, ListingRecord,
    LocationDescriptor, LocationMatch, PreferenceWeights, RankedListing,
};
pub use requests::MatchListingsRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchListingsResponse};
