//! Room demand handlers
//!
//! The UI prefilters its dropdowns, but the set contract (addable =
//! all bed types minus used ones, quantity floor at 1) is enforced here
//! regardless of the client.

use crate::dto::{ApiResponse, RoomDemandApplyRequest, RoomDemandApplyResponse};
use actix_web::{web, HttpResponse};
use caravela_core::AppError;
use tracing::{debug, instrument};

/// Apply a sequence of room demand operations
///
/// POST /api/v1/room-demand/apply
#[instrument(skip(body))]
pub async fn apply_operations(
    body: web::Json<RoomDemandApplyRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    debug!(ops = request.ops.len(), "applying room demand operations");

    let (demand, available) = request.apply()?;
    let response = RoomDemandApplyResponse::from_demand(&demand, available.as_deref());

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Configure room demand routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/room-demand").route("/apply", web::post().to(apply_operations)),
    );
}
