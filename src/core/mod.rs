// Core algorithm exports
pub mod distance;
pub mod enrich;
pub mod matcher;
pub mod radius;
pub mod scoring;
pub mod selector;

pub use distance::{haversine_distance, lookup_bounding_box};
pub use enrich::AmenityEnricher;
pub use matcher::{EngineParams, MatchEngine, MatchError};
pub use radius::{is_valid_postal_area, GeoRadiusFilter};
pub use scoring::{raw_score, score_and_rank};
pub use selector::CandidateSelector;
