//! Business logic services for Caravela
//!
//! This crate contains the pricing-side business logic: season and rate
//! resolution, tarification computation, the compute session state
//! machine, and payment schedule handling.
//!
//! # Architecture
//!
//! Services are designed to be composable and testable:
//! - The season matcher and tarification engine are pure; identical
//!   inputs always produce identical outputs
//! - Sessions live in an in-memory store guarded by `parking_lot`
//! - All entry points are instrumented with tracing
//! - Comprehensive error handling with AppError
//!
//! # Services
//!
//! - `SeasonMatcher` - season and room rate resolution for a target date
//! - `TarificationEngine` - per-pax line computation, supplements, totals
//! - `ComputeSession` / `SessionStore` - edit/compute/save lifecycle with
//!   last-request-wins token handling
//! - `PaymentScheduleService` - installment validation, presets, and
//!   due-date resolution

pub mod compute_session;
pub mod payments;
pub mod seasons;
pub mod tarification;

pub use compute_session::{ComputeSession, SessionPhase, SessionStore};
pub use payments::{PaymentScheduleService, PaymentTermsPreset, PAYMENT_TERMS_PRESETS};
pub use seasons::{ResolvedRate, SeasonMatcher};
pub use tarification::TarificationEngine;
