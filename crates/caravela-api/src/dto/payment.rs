//! Payment terms DTOs

use caravela_core::models::{PaymentTerms, ResolvedInstallment, TripDates};
use serde::{Deserialize, Serialize};

/// Validate/resolve request: the schedule plus optional trip dates
///
/// Trip dates may be unknown while a cotation is drafted; chronological
/// checks and due-date resolution are then deferred.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentTermsRequest {
    pub terms: PaymentTerms,
    #[serde(default)]
    pub trip: Option<TripDates>,
}

/// Validation outcome for a schedule
#[derive(Debug, Clone, Serialize)]
pub struct PaymentTermsValidation {
    pub valid: bool,
    pub total_percentage: rust_decimal::Decimal,
}

/// Resolved schedule response
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTermsResponse {
    pub installments: Vec<ResolvedInstallment>,
}

/// One preset in the catalogue
#[derive(Debug, Clone, Serialize)]
pub struct PaymentTermsPresetResponse {
    pub id: String,
    pub label: String,
    pub terms: PaymentTerms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_trip_parses() {
        let body = serde_json::json!({
            "terms": {
                "installments": [
                    {"percentage": "100", "due": {"type": "booking_date"}}
                ]
            }
        });
        let parsed: PaymentTermsRequest = serde_json::from_value(body).unwrap();
        assert!(parsed.trip.is_none());
        assert_eq!(parsed.terms.installments.len(), 1);
    }

    #[test]
    fn test_due_date_reference_wire_shapes() {
        let body = serde_json::json!({
            "terms": {
                "installments": [
                    {"percentage": "30", "due": {"type": "fixed_date", "date": "2026-08-01"}},
                    {"percentage": "70", "due": {"type": "days_before_departure", "days": 45}}
                ]
            }
        });
        let parsed: PaymentTermsRequest = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.terms.installments.len(), 2);
    }
}
