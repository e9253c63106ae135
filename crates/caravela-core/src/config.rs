//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub pricing: PricingConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma-separated list of allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

/// Dossier backend API configuration
///
/// The backend owns all persistent entities; this service only reads and
/// submits deltas over its REST-like JSON API.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the dossier backend API
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Bearer token for backend requests
    pub api_token: Option<String>,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_ms: u64,
}

fn default_backend_url() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_backend_timeout() -> u64 {
    5000
}

/// Pricing-specific configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// ISO 4217 currency code for computed amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Per-night supplement charged per demanded single room
    /// (zero disables the supplement)
    #[serde(default = "default_single_room_supplement")]
    pub single_room_supplement_per_night: Decimal,

    /// Minimum days between booking and departure to qualify for the
    /// early booking discount
    #[serde(default = "default_early_bird_min_days")]
    pub early_bird_min_days: u32,

    /// Early booking discount as a percentage of the line total
    /// (zero disables the discount)
    #[serde(default = "default_early_bird_discount")]
    pub early_bird_discount_percent: Decimal,
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_single_room_supplement() -> Decimal {
    Decimal::ZERO
}

fn default_early_bird_min_days() -> u32 {
    30
}

fn default_early_bird_discount() -> Decimal {
    Decimal::ZERO
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default(
                "server.cors_origins",
                "http://localhost:3000,http://127.0.0.1:3000",
            )?
            .set_default("backend.base_url", "http://localhost:4000/api")?
            .set_default("backend.timeout_ms", 5000)?
            .set_default("pricing.currency", "EUR")?
            .set_default("pricing.single_room_supplement_per_night", "0")?
            .set_default("pricing.early_bird_min_days", 30)?
            .set_default("pricing.early_bird_discount_percent", "0")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with CARAVELA_ prefix
            .add_source(
                Environment::with_prefix("CARAVELA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("CARAVELA").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            single_room_supplement_per_night: default_single_room_supplement(),
            early_bird_min_days: default_early_bird_min_days(),
            early_bird_discount_percent: default_early_bird_discount(),
        }
    }
}
