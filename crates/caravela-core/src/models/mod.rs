//! Domain models for Caravela
//!
//! This module contains all the core domain models used throughout the application.

pub mod invoice;
pub mod pax;
pub mod payment;
pub mod ratio;
pub mod room;
pub mod season;
pub mod tarification;

pub use invoice::InvoiceConfig;
pub use pax::{PaxCategory, PaxComposition, TripDates};
pub use payment::{
    DueDateReference, PaymentInstallment, PaymentTerms, ResolvedInstallment, PERCENT_TOTAL,
};
pub use ratio::{RatioRule, RatioSpec, RatioType};
pub use room::{BedType, FlaggedRoomDemandEntry, MealPlan, RoomDemand, RoomDemandEntry};
pub use season::{AccommodationSeason, RoomRate, SeasonDateRange, SeasonType};
pub use tarification::{
    ComputeRequest, CotationPaxResult, CotationSupplement, EnumerationEntry, PerGroupEntry,
    PerPersonEntry, RangeWebEntry, ServiceListEntry, SupplementKind, TarificationComputeResult,
    TarificationComputedLine, TarificationEntries, TarificationMode,
};
