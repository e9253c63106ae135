//! Caravela Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the Caravela tarification service. It includes:
//!
//! - Domain models (room demand, seasons, rates, tarification entries,
//!   payment terms)
//! - The `DossierBackend` trait abstracting the external dossier API
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
