//! Payment schedule handling
//!
//! Validates installment schedules against the 100% invariant, resolves
//! due-date references once trip dates are known, and exposes the preset
//! catalogue used by advisors.

use caravela_core::{
    models::{
        DueDateReference, PaymentInstallment, PaymentTerms, ResolvedInstallment, TripDates,
    },
    AppError, AppResult,
};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use tracing::{debug, instrument};

/// A named, ready-to-apply payment schedule
#[derive(Debug, Clone)]
pub struct PaymentTermsPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub terms: PaymentTerms,
}

/// Preset catalogue offered alongside manual entry
pub static PAYMENT_TERMS_PRESETS: Lazy<Vec<PaymentTermsPreset>> = Lazy::new(|| {
    vec![
        PaymentTermsPreset {
            id: "full_at_booking",
            label: "100% at booking",
            terms: PaymentTerms {
                installments: vec![PaymentInstallment {
                    percentage: dec!(100),
                    due: DueDateReference::BookingDate,
                    label: Some("Full payment".to_string()),
                }],
            },
        },
        PaymentTermsPreset {
            id: "50_50",
            label: "50/50",
            terms: PaymentTerms {
                installments: vec![
                    PaymentInstallment {
                        percentage: dec!(50),
                        due: DueDateReference::BookingDate,
                        label: Some("Deposit".to_string()),
                    },
                    PaymentInstallment {
                        percentage: dec!(50),
                        due: DueDateReference::DaysBeforeDeparture { days: 30 },
                        label: Some("Balance".to_string()),
                    },
                ],
            },
        },
        PaymentTermsPreset {
            id: "30_70_60d",
            label: "30/70 at 60 days",
            terms: PaymentTerms {
                installments: vec![
                    PaymentInstallment {
                        percentage: dec!(30),
                        due: DueDateReference::BookingDate,
                        label: Some("Deposit".to_string()),
                    },
                    PaymentInstallment {
                        percentage: dec!(70),
                        due: DueDateReference::DaysBeforeDeparture { days: 60 },
                        label: Some("Balance".to_string()),
                    },
                ],
            },
        },
    ]
});

/// Payment schedule service
///
/// Stateless; validation and resolution are deterministic over their
/// inputs.
pub struct PaymentScheduleService;

impl PaymentScheduleService {
    /// The preset catalogue
    pub fn presets() -> &'static [PaymentTermsPreset] {
        &PAYMENT_TERMS_PRESETS
    }

    /// Terms for a preset id
    pub fn preset(id: &str) -> AppResult<PaymentTerms> {
        PAYMENT_TERMS_PRESETS
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.terms.clone())
            .ok_or_else(|| AppError::NotFound(format!("payment terms preset {}", id)))
    }

    /// Validate a schedule for save
    ///
    /// On top of the structural invariants (non-empty, percentages summing
    /// to exactly 100) this checks chronological sense when trip dates are
    /// known: a later installment resolving to an earlier due date than
    /// its predecessor is a user error to flag, not silently accept.
    #[instrument(skip(terms, trip))]
    pub fn validate(terms: &PaymentTerms, trip: Option<&TripDates>) -> AppResult<()> {
        terms.validate()?;

        let mut prev: Option<(usize, chrono::NaiveDate)> = None;
        for (idx, installment) in terms.installments.iter().enumerate() {
            let Some(due) = installment.due.resolve(trip) else {
                continue;
            };
            if let Some((prev_idx, prev_due)) = prev {
                if due < prev_due {
                    return Err(AppError::Validation(format!(
                        "installment {} is due {}, before installment {} due {}",
                        idx + 1,
                        due,
                        prev_idx + 1,
                        prev_due
                    )));
                }
            }
            prev = Some((idx, due));
        }

        debug!(installments = terms.installments.len(), "payment terms valid");
        Ok(())
    }

    /// Resolve the schedule against trip dates
    ///
    /// Unresolvable due dates stay `None` ("date to be confirmed").
    /// Explicit labels win; otherwise an ordinal label is generated from
    /// list order.
    pub fn resolve(terms: &PaymentTerms, trip: Option<&TripDates>) -> Vec<ResolvedInstallment> {
        terms
            .installments
            .iter()
            .enumerate()
            .map(|(idx, installment)| ResolvedInstallment {
                label: installment
                    .label
                    .clone()
                    .unwrap_or_else(|| ordinal_label(idx + 1)),
                percentage: installment.percentage,
                due_date: installment.due.resolve(trip),
            })
            .collect()
    }
}

/// "1st installment", "2nd installment", ...
fn ordinal_label(position: usize) -> String {
    let suffix = match (position % 10, position % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{} installment", position, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip() -> TripDates {
        TripDates {
            departure: date(2026, 9, 10),
            return_date: date(2026, 9, 17),
            booking_date: Some(date(2026, 6, 1)),
        }
    }

    #[test]
    fn test_all_presets_sum_to_100() {
        for preset in PaymentScheduleService::presets() {
            assert!(
                preset.terms.validate().is_ok(),
                "preset {} must validate",
                preset.id
            );
        }
    }

    #[test]
    fn test_preset_lookup() {
        let terms = PaymentScheduleService::preset("50_50").unwrap();
        assert_eq!(terms.installments.len(), 2);
        assert!(PaymentScheduleService::preset("nope").is_err());
    }

    #[test]
    fn test_chronological_inconsistency_is_flagged() {
        // Second installment resolves before the first one
        let terms = PaymentTerms {
            installments: vec![
                PaymentInstallment {
                    percentage: dec!(40),
                    due: DueDateReference::DaysBeforeDeparture { days: 20 },
                    label: None,
                },
                PaymentInstallment {
                    percentage: dec!(60),
                    due: DueDateReference::DaysBeforeDeparture { days: 60 },
                    label: None,
                },
            ],
        };
        let err = PaymentScheduleService::validate(&terms, Some(&trip())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Without trip dates nothing resolves, so order cannot be judged
        assert!(PaymentScheduleService::validate(&terms, None).is_ok());
    }

    #[test]
    fn test_resolution_generates_ordinal_labels() {
        let mut terms = PaymentTerms::default();
        terms.add_installment();
        terms.add_installment();
        terms.add_installment();
        terms.installments[1].label = Some("Custom balance".to_string());

        let resolved = PaymentScheduleService::resolve(&terms, Some(&trip()));
        assert_eq!(resolved[0].label, "1st installment");
        assert_eq!(resolved[1].label, "Custom balance");
        assert_eq!(resolved[2].label, "3rd installment");
    }

    #[test]
    fn test_resolution_defers_unknown_dates() {
        let terms = PaymentTerms {
            installments: vec![
                PaymentInstallment {
                    percentage: dec!(50),
                    due: DueDateReference::BookingDate,
                    label: None,
                },
                PaymentInstallment {
                    percentage: dec!(50),
                    due: DueDateReference::FixedDate {
                        date: date(2026, 8, 1),
                    },
                    label: None,
                },
            ],
        };

        // No trip dates: booking-relative stays "to be confirmed"
        let resolved = PaymentScheduleService::resolve(&terms, None);
        assert_eq!(resolved[0].due_date, None);
        assert_eq!(resolved[1].due_date, Some(date(2026, 8, 1)));
    }

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(ordinal_label(1), "1st installment");
        assert_eq!(ordinal_label(2), "2nd installment");
        assert_eq!(ordinal_label(3), "3rd installment");
        assert_eq!(ordinal_label(4), "4th installment");
        assert_eq!(ordinal_label(11), "11th installment");
        assert_eq!(ordinal_label(21), "21st installment");
    }
}
