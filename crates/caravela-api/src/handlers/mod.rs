//! HTTP request handlers

pub mod invoice_config;
pub mod payment_terms;
pub mod rate_lookup;
pub mod room_demand;
pub mod tarification;

pub use invoice_config::configure as configure_invoice_config;
pub use payment_terms::configure as configure_payment_terms;
pub use rate_lookup::configure as configure_rate_lookup;
pub use room_demand::configure as configure_room_demand;
pub use tarification::configure as configure_tarification;
