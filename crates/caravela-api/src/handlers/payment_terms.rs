//! Payment terms handlers
//!
//! Validation happens before anything reaches the backend; an invalid
//! schedule is rejected with an error naming the current sum and the
//! delta to 100.

use crate::dto::{
    ApiResponse, PaymentTermsPresetResponse, PaymentTermsRequest, PaymentTermsValidation,
    ResolvedTermsResponse,
};
use actix_web::{web, HttpResponse};
use caravela_core::{traits::DossierBackend, AppError};
use caravela_services::PaymentScheduleService;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Validate a payment schedule
///
/// POST /api/v1/payment-terms/validate
#[instrument(skip(body))]
pub async fn validate_terms(
    body: web::Json<PaymentTermsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    PaymentScheduleService::validate(&request.terms, request.trip.as_ref())?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(PaymentTermsValidation {
        valid: true,
        total_percentage: request.terms.total_percentage(),
    })))
}

/// Resolve a schedule's due dates against trip dates
///
/// POST /api/v1/payment-terms/resolve
#[instrument(skip(body))]
pub async fn resolve_terms(body: web::Json<PaymentTermsRequest>) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let installments = PaymentScheduleService::resolve(&request.terms, request.trip.as_ref());

    Ok(HttpResponse::Ok().json(ApiResponse::success(ResolvedTermsResponse { installments })))
}

/// List the preset catalogue
///
/// GET /api/v1/payment-terms/presets
pub async fn list_presets() -> Result<HttpResponse, AppError> {
    let presets: Vec<PaymentTermsPresetResponse> = PaymentScheduleService::presets()
        .iter()
        .map(|p| PaymentTermsPresetResponse {
            id: p.id.to_string(),
            label: p.label.to_string(),
            terms: p.terms.clone(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(presets)))
}

/// Persist a cotation's payment schedule
///
/// PUT /api/v1/cotations/{id}/payment-terms
#[instrument(skip(backend, body))]
pub async fn save_terms(
    path: web::Path<Uuid>,
    backend: web::Data<dyn DossierBackend>,
    body: web::Json<PaymentTermsRequest>,
) -> Result<HttpResponse, AppError> {
    let cotation_id = path.into_inner();
    let request = body.into_inner();

    PaymentScheduleService::validate(&request.terms, request.trip.as_ref()).map_err(|e| {
        warn!(%cotation_id, "payment terms rejected: {}", e);
        e
    })?;

    backend.save_payment_terms(cotation_id, &request.terms).await?;

    info!(
        %cotation_id,
        installments = request.terms.installments.len(),
        "payment terms saved"
    );
    Ok(HttpResponse::Ok().json(ApiResponse::with_message((), "Payment terms saved")))
}

/// Configure payment terms routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payment-terms")
            .route("/validate", web::post().to(validate_terms))
            .route("/resolve", web::post().to(resolve_terms))
            .route("/presets", web::get().to(list_presets)),
    );
    cfg.route(
        "/cotations/{id}/payment-terms",
        web::put().to(save_terms),
    );
}
