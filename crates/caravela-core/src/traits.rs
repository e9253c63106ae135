//! Common traits for backend access
//!
//! The dossier backend owns every persistent entity; this layer talks to
//! it through `DossierBackend` so services and handlers stay testable
//! without a network.

use crate::error::AppError;
use crate::models::{
    AccommodationSeason, InvoiceConfig, PaymentTerms, RoomRate, TarificationEntries,
};
use async_trait::async_trait;
use uuid::Uuid;

/// External dossier backend API
///
/// Read-only for seasons and rates; writes submit deltas (entries,
/// payment terms), never derived compute results.
#[async_trait]
pub trait DossierBackend: Send + Sync {
    /// Fetch the current tenant's invoice configuration
    async fn get_invoice_config(&self) -> Result<InvoiceConfig, AppError>;

    /// Patch the current tenant's invoice configuration
    async fn patch_invoice_config(&self, config: &InvoiceConfig)
        -> Result<InvoiceConfig, AppError>;

    /// Fetch the seasons of an accommodation
    async fn fetch_seasons(&self, accommodation_id: i64)
        -> Result<Vec<AccommodationSeason>, AppError>;

    /// Fetch the room rates of an accommodation
    async fn fetch_room_rates(&self, accommodation_id: i64) -> Result<Vec<RoomRate>, AppError>;

    /// Persist the active mode's tarification entries for a cotation
    async fn save_tarification(
        &self,
        cotation_id: Uuid,
        entries: &TarificationEntries,
    ) -> Result<(), AppError>;

    /// Persist a cotation's payment terms
    async fn save_payment_terms(
        &self,
        cotation_id: Uuid,
        terms: &PaymentTerms,
    ) -> Result<(), AppError>;
}
