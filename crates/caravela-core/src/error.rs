//! Unified error handling for Caravela
//!
//! This module provides a comprehensive error type that covers all possible
//! failure scenarios in the application, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
///
/// Data-absence errors ("out of season", "no rate") are distinct variants
/// rather than a generic not-found: callers handle them differently
/// (propose the nearest season vs. an alternate meal plan).
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // ==================== Pricing Errors ====================
    #[error("No season covers {date} for accommodation {accommodation_id}")]
    OutOfSeason {
        accommodation_id: i64,
        date: NaiveDate,
    },

    #[error("No rate for category {room_category_id}, bed type {bed_type}, meal plan {meal_plan}")]
    RateNotFound {
        room_category_id: i64,
        bed_type: String,
        meal_plan: String,
    },

    #[error("No pricing range covers {pax} passengers")]
    NoApplicableRange { pax: u32 },

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // ==================== Compute Session Errors ====================
    #[error("Stale compute response for token {token}")]
    StaleResponse { token: u64 },

    #[error("Invalid session transition: {0}")]
    InvalidTransition(String),

    // ==================== Backend Errors ====================
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Backend returned status {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("Backend timed out after {ms}ms")]
    BackendTimeout { ms: u64 },

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_) | AppError::InvalidInput(_) | AppError::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }

            // 404 Not Found
            AppError::OutOfSeason { .. }
            | AppError::RateNotFound { .. }
            | AppError::NoApplicableRange { .. }
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::Conflict(_)
            | AppError::AlreadyExists(_)
            | AppError::StaleResponse { .. }
            | AppError::InvalidTransition(_) => StatusCode::CONFLICT,

            // 502 Bad Gateway
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,

            // Propagate the upstream status when it maps cleanly, 502 otherwise
            AppError::BackendStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }

            // 504 Gateway Timeout
            AppError::BackendTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::MissingField(_) => "missing_field",
            AppError::OutOfSeason { .. } => "out_of_season",
            AppError::RateNotFound { .. } => "rate_not_found",
            AppError::NoApplicableRange { .. } => "no_applicable_range",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::AlreadyExists(_) => "already_exists",
            AppError::StaleResponse { .. } => "stale_response",
            AppError::InvalidTransition(_) => "invalid_transition",
            AppError::Backend(_) => "backend_error",
            AppError::BackendStatus { .. } => "backend_status",
            AppError::BackendTimeout { .. } => "backend_timeout",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
