//! API layer for Caravela
//!
//! HTTP handlers for tarification computation, payment terms, room
//! demand, rate lookup, and invoice configuration.

#![forbid(unsafe_code)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::ApiResponse;

// Re-export handler configuration functions
pub use handlers::{
    configure_invoice_config, configure_payment_terms, configure_rate_lookup,
    configure_room_demand, configure_tarification,
};
