// Service exports
pub mod geocode;
pub mod poi;
pub mod store;

pub use geocode::{GeocodeClient, GeocodeError, NominatimClient};
pub use poi::{OverpassClient, PoiClient, PoiError};
pub use store::{ListingStore, PgListingStore, StoreError};
