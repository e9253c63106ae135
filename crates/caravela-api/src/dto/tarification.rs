//! Tarification DTOs
//!
//! Request and response types for the compute and save endpoints.

use caravela_core::models::{
    ComputeRequest, PaxComposition, RoomDemand, TarificationComputeResult, TarificationEntries,
    TripDates,
};
use caravela_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Compute request body
///
/// `entries` is the tagged union for the active mode; `room_demand` is
/// re-validated on deserialization (unique bed types, quantities >= 1).
#[derive(Debug, Clone, Deserialize)]
pub struct TarificationComputeRequest {
    pub entries: TarificationEntries,
    #[serde(default)]
    pub room_demand: RoomDemand,
    #[serde(default)]
    pub pax: PaxComposition,
    pub trip: TripDates,
}

impl TarificationComputeRequest {
    /// Build the engine request for a cotation
    pub fn into_compute_request(self, cotation_id: Uuid) -> AppResult<ComputeRequest> {
        self.trip.validate()?;
        Ok(ComputeRequest {
            cotation_id,
            entries: self.entries,
            room_demand: self.room_demand,
            pax: self.pax,
            trip: self.trip,
        })
    }
}

/// Save request body: the entries to persist (never a computed result)
#[derive(Debug, Clone, Deserialize)]
pub struct SaveTarificationRequest {
    pub entries: TarificationEntries,
}

impl SaveTarificationRequest {
    /// Reject saves that would wipe the cotation's pricing
    pub fn validate_business_rules(&self) -> Result<(), AppError> {
        if self.entries.is_empty() {
            return Err(AppError::Validation(
                "refusing to save an empty tarification; delete the cotation pricing instead"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Compute response: the computed result plus the request token used for
/// stale-response discard on the client side
#[derive(Debug, Clone, Serialize)]
pub struct TarificationComputeResponse {
    pub token: u64,
    #[serde(flatten)]
    pub result: TarificationComputeResult,
}
