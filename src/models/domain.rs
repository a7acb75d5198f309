use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a listing's location arrived from the source data.
///
/// Upstream rows are heterogeneous: some carry a structured locality/city
/// pair, others only a flat display string. The seeding pipeline resolves
/// each row into exactly one of these variants, so the engine never has to
/// re-parse location strings at scoring time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationDescriptor {
    Structured {
        locality: Option<String>,
        city: Option<String>,
    },
    Flat(String),
}

impl LocationDescriptor {
    /// Build a descriptor from raw store columns. Structured fields win when
    /// either is present; otherwise the flat display string is used as-is.
    pub fn from_parts(
        locality: Option<String>,
        city: Option<String>,
        flat: Option<String>,
    ) -> Self {
        if locality.is_some() || city.is_some() {
            Self::Structured { locality, city }
        } else {
            Self::Flat(flat.unwrap_or_default())
        }
    }

    /// Human-readable display string, e.g. "Salt Lake, Kolkata".
    pub fn display(&self) -> String {
        match self {
            Self::Structured { locality, city } => [locality.as_deref(), city.as_deref()]
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<_>>()
                .join(", "),
            Self::Flat(s) => s.clone(),
        }
    }
}

/// Listing record as stored by the listing store. Read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: Uuid,
    pub title: String,
    pub price: i64,
    #[serde(default)]
    pub bedrooms: Option<i32>,
    pub location: LocationDescriptor,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ListingRecord {
    /// Coordinates when both components are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// A resolved geographic point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Amenity categories counted around a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityKind {
    School,
    Hospital,
    Restaurant,
}

impl AmenityKind {
    /// Tag value used by the point-of-interest query service.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Hospital => "hospital",
            Self::Restaurant => "restaurant",
        }
    }
}

/// Per-candidate amenity counts. Every lookup failure defaults to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmenityCounts {
    pub schools: u32,
    pub hospitals: u32,
    pub restaurants: u32,
}

/// Caller-supplied weights for the three amenity categories.
///
/// Expected in [0, 10] but deliberately not clamped: out-of-range or
/// negative values only shift the ranking, they never fail the request.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceWeights {
    pub schools: f64,
    pub hospitals: f64,
    pub restaurants: f64,
}

/// A candidate enriched with amenity counts and scored against the rest of
/// the result set. Exists only for the lifetime of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedListing {
    pub id: Uuid,
    pub title: String,
    pub price: i64,
    #[serde(default)]
    pub bedrooms: Option<i32>,
    pub location: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub schools: u32,
    pub hospitals: u32,
    pub restaurants: u32,
    #[serde(rename = "rawScore")]
    pub raw_score: f64,
    pub score: u8,
}

impl RankedListing {
    /// Flatten a listing and its counts into a scoreable candidate. Scores
    /// are filled in by the scoring pass.
    pub fn new(listing: ListingRecord, counts: AmenityCounts) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            price: listing.price,
            bedrooms: listing.bedrooms,
            location: listing.location.display(),
            latitude: listing.latitude,
            longitude: listing.longitude,
            schools: counts.schools,
            hospitals: counts.hospitals,
            restaurants: counts.restaurants,
            raw_score: 0.0,
            score: 0,
        }
    }
}

/// Filter predicate handed to the listing store.
#[derive(Debug, Clone)]
pub struct ListingFilter {
    /// Inclusive lower price bound.
    pub min_price: i64,
    /// Exclusive upper price bound.
    pub max_price: i64,
    pub bedrooms: Option<i32>,
    pub location: Option<LocationMatch>,
}

/// Which location fields a store query matches against.
#[derive(Debug, Clone)]
pub enum LocationMatch {
    /// Case-insensitive substring over the structured locality/city pair.
    Structured(String),
    /// Case-insensitive substring over the flat display field.
    Flat(String),
}
