//! Accommodation season and room rate models
//!
//! Seasons and rates are owned by the dossier backend; this layer only
//! fetches them and resolves which one applies to a target date.

use super::room::{BedType, MealPlan};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Season classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonType {
    Low,
    Mid,
    High,
    Peak,
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonType::Low => write!(f, "low"),
            SeasonType::Mid => write!(f, "mid"),
            SeasonType::High => write!(f, "high"),
            SeasonType::Peak => write!(f, "peak"),
        }
    }
}

/// Inclusive date range belonging to a season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SeasonDateRange {
    /// Whether the range contains the date (inclusive on both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered by the range
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// An accommodation season: named date ranges with a priority level
///
/// Overlapping seasons are resolved by highest `level`; read-only from
/// this layer's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationSeason {
    pub id: i64,

    /// Owning accommodation
    pub accommodation_id: i64,

    /// Display name (e.g. "Summer 2026", "Easter week")
    pub name: String,

    pub season_type: SeasonType,

    /// Priority for overlap resolution (higher wins)
    pub level: i32,

    pub ranges: Vec<SeasonDateRange>,
}

impl AccommodationSeason {
    /// The range containing the date, if any
    pub fn matching_range(&self, date: NaiveDate) -> Option<&SeasonDateRange> {
        self.ranges.iter().find(|r| r.contains(date))
    }

    /// Whether any of the season's ranges contains the date
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.matching_range(date).is_some()
    }
}

/// Room rate row: price per person per night for a
/// (category, season, bed type, meal plan) tuple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRate {
    pub id: i64,
    pub room_category_id: i64,
    pub season_id: i64,
    pub bed_type: BedType,
    pub meal_plan: MealPlan,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = SeasonDateRange {
            start: date(2026, 7, 1),
            end: date(2026, 8, 31),
        };
        assert!(range.contains(date(2026, 7, 1)));
        assert!(range.contains(date(2026, 8, 31)));
        assert!(range.contains(date(2026, 8, 2)));
        assert!(!range.contains(date(2026, 6, 30)));
        assert!(!range.contains(date(2026, 9, 1)));
    }

    #[test]
    fn test_span_days() {
        let range = SeasonDateRange {
            start: date(2026, 7, 1),
            end: date(2026, 7, 1),
        };
        assert_eq!(range.span_days(), 1);

        let range = SeasonDateRange {
            start: date(2026, 7, 1),
            end: date(2026, 7, 31),
        };
        assert_eq!(range.span_days(), 31);
    }

    #[test]
    fn test_season_matching_range() {
        let season = AccommodationSeason {
            id: 1,
            accommodation_id: 10,
            name: "Shoulder".to_string(),
            season_type: SeasonType::Mid,
            level: 1,
            ranges: vec![
                SeasonDateRange {
                    start: date(2026, 5, 1),
                    end: date(2026, 6, 15),
                },
                SeasonDateRange {
                    start: date(2026, 9, 1),
                    end: date(2026, 10, 15),
                },
            ],
        };

        assert!(season.contains(date(2026, 5, 20)));
        assert!(season.contains(date(2026, 9, 1)));
        assert!(!season.contains(date(2026, 7, 10)));
        assert_eq!(
            season.matching_range(date(2026, 9, 10)).unwrap().start,
            date(2026, 9, 1)
        );
    }

    #[test]
    fn test_room_rate_serde_shape() {
        let rate = RoomRate {
            id: 3,
            room_category_id: 7,
            season_id: 1,
            bed_type: BedType::Dbl,
            meal_plan: MealPlan::HalfBoard,
            price: dec!(84.50),
        };
        let json = serde_json::to_value(&rate).unwrap();
        assert_eq!(json["bed_type"], "DBL");
        assert_eq!(json["meal_plan"], "half_board");
    }
}
