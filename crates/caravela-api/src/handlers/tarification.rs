//! Tarification handlers
//!
//! Compute runs the pricing engine against the request and drives the
//! cotation's compute session (token issue, completion, failure). Save
//! persists the entries through the dossier backend, never the derived
//! result.

use crate::dto::{
    ApiResponse, SaveTarificationRequest, TarificationComputeRequest, TarificationComputeResponse,
};
use actix_web::{web, HttpResponse};
use caravela_core::{traits::DossierBackend, AppError};
use caravela_services::{SessionStore, TarificationEngine};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Compute the pricing for a cotation
///
/// POST /api/v1/cotations/{id}/tarification/compute
#[instrument(skip(engine, sessions, body))]
pub async fn compute_tarification(
    path: web::Path<Uuid>,
    engine: web::Data<TarificationEngine>,
    sessions: web::Data<SessionStore>,
    body: web::Json<TarificationComputeRequest>,
) -> Result<HttpResponse, AppError> {
    let cotation_id = path.into_inner();
    let request = body.into_inner().into_compute_request(cotation_id)?;

    debug!(%cotation_id, mode = %request.entries.mode(), "compute requested");

    let (token, request) = sessions.with(cotation_id, |session| {
        session.edit_entries(request.entries.clone());
        session.set_context(request.room_demand.clone(), request.pax, request.trip);
        session.begin_compute()
    })?;

    match engine.compute(&request) {
        Ok(result) => {
            let applied =
                sessions.with(cotation_id, |s| s.complete_compute(token, result.clone()));
            if !applied {
                // A newer request took over; the caller discards by token
                warn!(%cotation_id, token, "compute result superseded");
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(TarificationComputeResponse {
                token,
                result,
            })))
        }
        Err(e) => {
            sessions.with(cotation_id, |s| s.fail_compute(token, e.to_string()));
            Err(e)
        }
    }
}

/// Persist the active mode's entries for a cotation
///
/// PUT /api/v1/cotations/{id}/tarification
#[instrument(skip(backend, sessions, body))]
pub async fn save_tarification(
    path: web::Path<Uuid>,
    backend: web::Data<dyn DossierBackend>,
    sessions: web::Data<SessionStore>,
    body: web::Json<SaveTarificationRequest>,
) -> Result<HttpResponse, AppError> {
    let cotation_id = path.into_inner();
    let request = body.into_inner();

    request.validate_business_rules().map_err(|e| {
        warn!(%cotation_id, "tarification save validation failed: {}", e);
        e
    })?;

    sessions.with(cotation_id, |s| s.edit_entries(request.entries.clone()));

    match backend.save_tarification(cotation_id, &request.entries).await {
        Ok(()) => {
            sessions.with(cotation_id, |s| s.complete_save());
            info!(%cotation_id, "tarification entries saved");
            Ok(HttpResponse::Ok().json(ApiResponse::with_message((), "Tarification saved")))
        }
        Err(e) => {
            // Keep the edited entries so the save stays retryable
            sessions.with(cotation_id, |s| s.fail_save(e.to_string()));
            Err(e)
        }
    }
}

/// Configure tarification routes
///
/// Registered as exact-path resources: other modules also add routes
/// under /cotations, and a shared scope would swallow them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/cotations/{id}/tarification/compute",
        web::post().to(compute_tarification),
    );
    cfg.route(
        "/cotations/{id}/tarification",
        web::put().to(save_tarification),
    );
}
