//! Passenger composition and trip date models

use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Passenger category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaxCategory {
    Adult,
    Teen,
    Child,
    Infant,
}

impl PaxCategory {
    /// All categories, in pricing order
    pub const ALL: [PaxCategory; 4] = [
        PaxCategory::Adult,
        PaxCategory::Teen,
        PaxCategory::Child,
        PaxCategory::Infant,
    ];

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "adult" => Some(PaxCategory::Adult),
            "teen" => Some(PaxCategory::Teen),
            "child" => Some(PaxCategory::Child),
            "infant" => Some(PaxCategory::Infant),
            _ => None,
        }
    }
}

impl fmt::Display for PaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaxCategory::Adult => write!(f, "adult"),
            PaxCategory::Teen => write!(f, "teen"),
            PaxCategory::Child => write!(f, "child"),
            PaxCategory::Infant => write!(f, "infant"),
        }
    }
}

/// Passenger counts broken down by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaxComposition {
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub teens: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
}

impl PaxComposition {
    pub fn total(&self) -> u32 {
        self.adults + self.teens + self.children + self.infants
    }

    pub fn count(&self, category: PaxCategory) -> u32 {
        match category {
            PaxCategory::Adult => self.adults,
            PaxCategory::Teen => self.teens,
            PaxCategory::Child => self.children,
            PaxCategory::Infant => self.infants,
        }
    }

    /// Paying passengers: infants travel free
    pub fn paying(&self) -> u32 {
        self.adults + self.teens + self.children
    }

    /// Paying count for a category (0 for infants)
    pub fn paying_count(&self, category: PaxCategory) -> u32 {
        match category {
            PaxCategory::Infant => 0,
            other => self.count(other),
        }
    }
}

/// Trip dates carried with a compute request
///
/// `booking_date` may be unknown while a cotation is still being drafted;
/// anything that needs it (early booking discount, booking-relative
/// installments) then stays unresolved rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDates {
    pub departure: NaiveDate,
    pub return_date: NaiveDate,
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
}

impl TripDates {
    /// Validate date ordering
    pub fn validate(&self) -> Result<(), AppError> {
        if self.return_date < self.departure {
            return Err(AppError::Validation(format!(
                "return date {} precedes departure {}",
                self.return_date, self.departure
            )));
        }
        if let Some(booking) = self.booking_date {
            if booking > self.departure {
                return Err(AppError::Validation(format!(
                    "booking date {} is after departure {}",
                    booking, self.departure
                )));
            }
        }
        Ok(())
    }

    /// Number of nights between departure and return
    pub fn nights(&self) -> i64 {
        (self.return_date - self.departure).num_days()
    }

    /// Days between booking and departure, when the booking date is known
    pub fn days_before_departure(&self) -> Option<i64> {
        self.booking_date.map(|b| (self.departure - b).num_days())
    }
}
