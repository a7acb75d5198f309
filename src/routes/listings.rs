use crate::core::{MatchEngine, MatchError};
use crate::models::{ErrorResponse, HealthResponse, MatchListingsRequest, MatchListingsResponse};
use crate::services::{ListingStore, PgListingStore};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PgListingStore>,
    pub engine: Arc<MatchEngine>,
}

/// Configure all listing-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/listings", web::get().to(list_listings))
        .route("/listings/match", web::post().to(match_listings));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List all listings
///
/// GET /api/v1/listings
async fn list_listings(state: web::Data<AppState>) -> impl Responder {
    match state.store.all().await {
        Ok(listings) => HttpResponse::Ok().json(listings),
        Err(e) => {
            tracing::error!("failed to fetch listings: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "store_error".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Match listings endpoint
///
/// POST /api/v1/listings/match
///
/// Request body:
/// ```json
/// {
///   "budget": 3000000,
///   "preferredBedrooms": 2,
///   "location": "Kolkata",
///   "postalArea": "700001",
///   "schoolWeight": 5,
///   "hospitalWeight": 5,
///   "restaurantWeight": 5
/// }
/// ```
async fn match_listings(
    state: web::Data<AppState>,
    req: web::Json<MatchListingsRequest>,
) -> impl Responder {
    tracing::info!(
        "matching listings for location {:?}, budget {}",
        req.location,
        req.budget
    );

    match state.engine.match_listings(&req).await {
        Ok(ranked) if ranked.is_empty() => {
            // Empty success is a recognizable outcome, not a pipeline error.
            HttpResponse::NotFound().json(ErrorResponse {
                error: "no_matches".to_string(),
                message: "No matching listings found".to_string(),
                status_code: 404,
            })
        }
        Ok(ranked) => {
            tracing::info!("returning {} ranked listings", ranked.len());
            HttpResponse::Ok().json(MatchListingsResponse {
                total_results: ranked.len(),
                matches: ranked,
            })
        }
        Err(MatchError::Validation(message)) => {
            tracing::info!("validation failed for match request: {}", message);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "validation_failed".to_string(),
                message,
                status_code: 400,
            })
        }
        Err(MatchError::Store(e)) => {
            tracing::error!("listing store query failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "store_error".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
