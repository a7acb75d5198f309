use crate::models::{ListingFilter, ListingRecord, LocationDescriptor, LocationMatch};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when querying the listing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Listing store interface.
///
/// The engine only needs a predicate query; keeping it behind a trait lets
/// the pipeline be exercised against an in-memory store in tests.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Fetch all listings matching the filter.
    async fn find(&self, filter: &ListingFilter) -> Result<Vec<ListingRecord>, StoreError>;

    /// Fetch every listing (used by the browse endpoint).
    async fn all(&self) -> Result<Vec<ListingRecord>, StoreError>;
}

/// PostgreSQL-backed listing store.
///
/// Listings are written by the seeding pipeline; this client only reads.
pub struct PgListingStore {
    pool: PgPool,
}

const LISTING_COLUMNS: &str =
    "id, title, price, bedrooms, locality, city, location, latitude, longitude, created_at";

impl PgListingStore {
    /// Create a new store client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Check whether the store is reachable
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 AS alive").fetch_one(&self.pool).await?;
        let alive: i32 = row.try_get("alive")?;
        Ok(alive == 1)
    }

    fn record_from_row(row: &sqlx::postgres::PgRow) -> Result<ListingRecord, sqlx::Error> {
        let locality: Option<String> = row.try_get("locality")?;
        let city: Option<String> = row.try_get("city")?;
        let flat: Option<String> = row.try_get("location")?;

        Ok(ListingRecord {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            bedrooms: row.try_get("bedrooms")?,
            location: LocationDescriptor::from_parts(locality, city, flat),
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn find(&self, filter: &ListingFilter) -> Result<Vec<ListingRecord>, StoreError> {
        let mut query = sqlx::QueryBuilder::<sqlx::Postgres>::new(format!(
            "SELECT {} FROM listings WHERE price >= ",
            LISTING_COLUMNS
        ));
        query.push_bind(filter.min_price);
        query.push(" AND price < ");
        query.push_bind(filter.max_price);

        if let Some(bedrooms) = filter.bedrooms {
            query.push(" AND bedrooms = ");
            query.push_bind(bedrooms);
        }

        match &filter.location {
            Some(LocationMatch::Structured(term)) => {
                let pattern = format!("%{}%", term);
                query.push(" AND (locality ILIKE ");
                query.push_bind(pattern.clone());
                query.push(" OR city ILIKE ");
                query.push_bind(pattern);
                query.push(")");
            }
            Some(LocationMatch::Flat(term)) => {
                query.push(" AND location ILIKE ");
                query.push_bind(format!("%{}%", term));
            }
            None => {}
        }

        let rows = query.build().fetch_all(&self.pool).await?;
        let listings = rows
            .iter()
            .map(Self::record_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("store query matched {} listings", listings.len());

        Ok(listings)
    }

    async fn all(&self) -> Result<Vec<ListingRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM listings ORDER BY created_at DESC NULLS LAST",
            LISTING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(Self::record_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
