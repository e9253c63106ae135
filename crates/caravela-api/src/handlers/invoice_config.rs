//! Invoice configuration handlers
//!
//! Thin proxy over the backend's tenant invoice configuration.

use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use caravela_core::{models::InvoiceConfig, traits::DossierBackend, AppError};
use tracing::{info, instrument};

/// Fetch the tenant invoice configuration
///
/// GET /api/v1/invoice-config
#[instrument(skip(backend))]
pub async fn get_invoice_config(
    backend: web::Data<dyn DossierBackend>,
) -> Result<HttpResponse, AppError> {
    let config = backend.get_invoice_config().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(config)))
}

/// Patch the tenant invoice configuration
///
/// PATCH /api/v1/invoice-config
#[instrument(skip(backend, body))]
pub async fn patch_invoice_config(
    backend: web::Data<dyn DossierBackend>,
    body: web::Json<InvoiceConfig>,
) -> Result<HttpResponse, AppError> {
    let updated = backend.patch_invoice_config(&body.into_inner()).await?;
    info!("invoice configuration updated");
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        updated,
        "Invoice configuration updated",
    )))
}

/// Configure invoice configuration routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoice-config")
            .route("", web::get().to(get_invoice_config))
            .route("", web::patch().to(patch_invoice_config)),
    );
}
