//! HTTP client for the dossier backend API
//!
//! The dossier backend owns all persistent entities (dossiers, cotations,
//! accommodations, seasons, rates, payment terms). This crate provides the
//! reqwest-based implementation of `caravela_core::traits::DossierBackend`
//! used by the server; services and handlers only see the trait.

pub mod client;

pub use client::DossierBackendClient;
