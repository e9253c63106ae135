//! Season/rate lookup handlers
//!
//! Fetches the accommodation's seasons and rates from the backend, then
//! resolves deterministically. "Out of season" and "no rate" surface as
//! distinct errors.

use crate::dto::{ApiResponse, RateLookupQuery, RateLookupResponse};
use actix_web::{web, HttpResponse};
use caravela_core::{traits::DossierBackend, AppError};
use caravela_services::SeasonMatcher;
use tracing::{debug, instrument};
use validator::Validate;

/// Resolve the season and rate for a date
///
/// GET /api/v1/accommodations/{id}/rate-lookup
#[instrument(skip(backend, query))]
pub async fn lookup_rate(
    path: web::Path<i64>,
    query: web::Query<RateLookupQuery>,
    backend: web::Data<dyn DossierBackend>,
) -> Result<HttpResponse, AppError> {
    let accommodation_id = path.into_inner();
    query.validate().map_err(AppError::from)?;
    let (bed_type, meal_plan) = query.parsed()?;

    debug!(
        accommodation_id,
        %bed_type,
        %meal_plan,
        date = %query.date,
        "rate lookup"
    );

    let seasons = backend.fetch_seasons(accommodation_id).await?;
    let rates = backend.fetch_room_rates(accommodation_id).await?;

    let matcher = SeasonMatcher::new();
    let resolved = matcher.resolve(
        accommodation_id,
        query.date,
        query.room_category_id,
        bed_type,
        meal_plan,
        &seasons,
        &rates,
    )?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(RateLookupResponse {
        season_id: resolved.season.id,
        season_name: resolved.season.name.clone(),
        season_type: resolved.season.season_type,
        bed_type: resolved.rate.bed_type,
        meal_plan: resolved.rate.meal_plan,
        price: resolved.rate.price,
        exact_meal_plan: resolved.exact_meal_plan,
    })))
}

/// Configure rate lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/accommodations/{id}/rate-lookup",
        web::get().to(lookup_rate),
    );
}
