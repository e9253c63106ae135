//! Payment terms and installment models
//!
//! A payment terms record is an ordered list of installments whose
//! percentages must sum to exactly 100. Due dates are references resolved
//! against trip dates; resolution is deferred while those dates are
//! unknown.

use super::pax::TripDates;
use crate::error::AppError;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reference a payment installment's due date is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DueDateReference {
    /// Due when the trip is booked
    BookingDate,
    /// Due on the departure day
    DepartureDate,
    /// Due on a literal date
    FixedDate { date: NaiveDate },
    /// Due a number of days before departure
    DaysBeforeDeparture { days: u32 },
}

impl DueDateReference {
    /// Resolve against trip dates; `None` means "date to be confirmed"
    pub fn resolve(&self, trip: Option<&TripDates>) -> Option<NaiveDate> {
        match self {
            DueDateReference::FixedDate { date } => Some(*date),
            DueDateReference::BookingDate => trip.and_then(|t| t.booking_date),
            DueDateReference::DepartureDate => trip.map(|t| t.departure),
            DueDateReference::DaysBeforeDeparture { days } => {
                trip.map(|t| t.departure - Duration::days(i64::from(*days)))
            }
        }
    }
}

/// One installment of a payment schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstallment {
    /// Share of the total price, in percent
    pub percentage: Decimal,
    pub due: DueDateReference,
    /// Explicit label; when absent an ordinal one is generated from
    /// list order
    #[serde(default)]
    pub label: Option<String>,
}

/// Ordered list of installments for one cotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub installments: Vec<PaymentInstallment>,
}

/// Exact percentage total a valid schedule must reach
pub const PERCENT_TOTAL: Decimal = Decimal::ONE_HUNDRED;

impl PaymentTerms {
    /// Sum of installment percentages
    pub fn total_percentage(&self) -> Decimal {
        self.installments.iter().map(|i| i.percentage).sum()
    }

    /// Append an installment with a default percentage of 0, due at booking
    pub fn add_installment(&mut self) {
        self.installments.push(PaymentInstallment {
            percentage: Decimal::ZERO,
            due: DueDateReference::BookingDate,
            label: None,
        });
    }

    /// Validate the schedule for save
    ///
    /// Requires at least one installment, non-negative percentages, and a
    /// total of exactly 100. The error names the current sum and the delta
    /// needed.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.installments.is_empty() {
            return Err(AppError::Validation(
                "payment terms need at least one installment".to_string(),
            ));
        }

        for (idx, installment) in self.installments.iter().enumerate() {
            if installment.percentage < Decimal::ZERO {
                return Err(AppError::Validation(format!(
                    "installment {} has a negative percentage ({})",
                    idx + 1,
                    installment.percentage
                )));
            }
        }

        let total = self.total_percentage();
        if total != PERCENT_TOTAL {
            let delta = PERCENT_TOTAL - total;
            let direction = if delta > Decimal::ZERO {
                "missing"
            } else {
                "in excess"
            };
            return Err(AppError::Validation(format!(
                "installment percentages sum to {}, {} {}% to reach 100",
                total,
                direction,
                delta.abs()
            )));
        }

        Ok(())
    }
}

/// An installment with its due date resolved (or deferred) and its
/// display label generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedInstallment {
    pub label: String,
    pub percentage: Decimal,
    /// `None` renders as "date to be confirmed"
    pub due_date: Option<NaiveDate>,
}
