//! Season and rate resolution
//!
//! Given a target date and an accommodation's season list, selects the
//! applicable season, then the matching room rate for a (category, bed
//! type, meal plan) tuple.
//!
//! Overlap policy: highest `level` wins, then the most specific
//! (shortest) matching range, then the lowest season id. Rate fallback:
//! exact (bed type, meal plan) match, else the same bed type with the
//! default meal plan, else fail closed. "Out of season" and "no rate"
//! are distinct errors because callers handle them differently.

use caravela_core::{
    models::{AccommodationSeason, BedType, MealPlan, RoomRate},
    AppError, AppResult,
};
use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

/// Outcome of a full season + rate resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRate<'a> {
    pub season: &'a AccommodationSeason,
    pub rate: &'a RoomRate,
    /// False when the rate came from the meal plan fallback
    pub exact_meal_plan: bool,
}

/// Season and rate matcher
///
/// Stateless apart from the configured fallback meal plan; all lookups
/// are deterministic.
pub struct SeasonMatcher {
    fallback_meal_plan: MealPlan,
}

impl Default for SeasonMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SeasonMatcher {
    pub fn new() -> Self {
        Self {
            fallback_meal_plan: MealPlan::default(),
        }
    }

    /// Use a different meal plan as the rate fallback
    pub fn with_fallback_meal_plan(fallback_meal_plan: MealPlan) -> Self {
        Self { fallback_meal_plan }
    }

    /// Resolve the season applicable on `date`
    ///
    /// Among seasons whose ranges contain the date, the highest `level`
    /// wins; ties break to the most specific (shortest) matching range,
    /// then to the lowest id.
    #[instrument(skip(self, seasons))]
    pub fn resolve_season<'a>(
        &self,
        accommodation_id: i64,
        date: NaiveDate,
        seasons: &'a [AccommodationSeason],
    ) -> AppResult<&'a AccommodationSeason> {
        let mut best: Option<(&AccommodationSeason, i64)> = None;

        for season in seasons {
            let Some(range) = season.matching_range(date) else {
                continue;
            };
            let span = range.span_days();

            let better = match best {
                None => true,
                Some((current, current_span)) => {
                    (season.level, -span, -season.id)
                        > (current.level, -current_span, -current.id)
                }
            };
            if better {
                best = Some((season, span));
            }
        }

        match best {
            Some((season, _)) => {
                debug!(
                    season_id = season.id,
                    level = season.level,
                    "resolved season {} for {}",
                    season.name,
                    date
                );
                Ok(season)
            }
            None => {
                warn!("no season covers {} for accommodation {}", date, accommodation_id);
                Err(AppError::OutOfSeason {
                    accommodation_id,
                    date,
                })
            }
        }
    }

    /// Resolve the rate for a (category, bed type, meal plan) tuple within
    /// an already-resolved season
    ///
    /// Exact match first; otherwise the same bed type under the fallback
    /// meal plan; otherwise fail closed with a "no rate" error. An
    /// arbitrary row is never substituted.
    #[instrument(skip(self, season, rates))]
    pub fn resolve_rate<'a>(
        &self,
        season: &AccommodationSeason,
        room_category_id: i64,
        bed_type: BedType,
        meal_plan: MealPlan,
        rates: &'a [RoomRate],
    ) -> AppResult<(&'a RoomRate, bool)> {
        let in_scope = |r: &&RoomRate| {
            r.season_id == season.id && r.room_category_id == room_category_id && r.bed_type == bed_type
        };

        if let Some(rate) = rates
            .iter()
            .filter(in_scope)
            .find(|r| r.meal_plan == meal_plan)
        {
            return Ok((rate, true));
        }

        if meal_plan != self.fallback_meal_plan {
            if let Some(rate) = rates
                .iter()
                .filter(in_scope)
                .find(|r| r.meal_plan == self.fallback_meal_plan)
            {
                debug!(
                    rate_id = rate.id,
                    "no {} rate, falling back to {}",
                    meal_plan,
                    self.fallback_meal_plan
                );
                return Ok((rate, false));
            }
        }

        warn!(
            season_id = season.id,
            "no rate for category {}, bed type {}, meal plan {}",
            room_category_id,
            bed_type,
            meal_plan
        );
        Err(AppError::RateNotFound {
            room_category_id,
            bed_type: bed_type.to_string(),
            meal_plan: meal_plan.to_string(),
        })
    }

    /// Resolve season and rate in one step
    pub fn resolve<'a>(
        &self,
        accommodation_id: i64,
        date: NaiveDate,
        room_category_id: i64,
        bed_type: BedType,
        meal_plan: MealPlan,
        seasons: &'a [AccommodationSeason],
        rates: &'a [RoomRate],
    ) -> AppResult<ResolvedRate<'a>> {
        let season = self.resolve_season(accommodation_id, date, seasons)?;
        let (rate, exact_meal_plan) =
            self.resolve_rate(season, room_category_id, bed_type, meal_plan, rates)?;
        Ok(ResolvedRate {
            season,
            rate,
            exact_meal_plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caravela_core::models::{SeasonDateRange, SeasonType};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn season(id: i64, level: i32, start: NaiveDate, end: NaiveDate) -> AccommodationSeason {
        AccommodationSeason {
            id,
            accommodation_id: 10,
            name: format!("season-{}", id),
            season_type: SeasonType::Mid,
            level,
            ranges: vec![SeasonDateRange { start, end }],
        }
    }

    fn rate(
        id: i64,
        season_id: i64,
        bed_type: BedType,
        meal_plan: MealPlan,
        price: rust_decimal::Decimal,
    ) -> RoomRate {
        RoomRate {
            id,
            room_category_id: 7,
            season_id,
            bed_type,
            meal_plan,
            price,
        }
    }

    #[test]
    fn test_highest_level_wins_on_overlap() {
        let seasons = vec![
            season(1, 1, date(2026, 6, 1), date(2026, 9, 30)),
            season(2, 3, date(2026, 7, 1), date(2026, 8, 31)),
        ];
        let matcher = SeasonMatcher::new();

        let resolved = matcher
            .resolve_season(10, date(2026, 7, 15), &seasons)
            .unwrap();
        assert_eq!(resolved.id, 2);

        // Outside the high-priority window the base season applies
        let resolved = matcher
            .resolve_season(10, date(2026, 6, 10), &seasons)
            .unwrap();
        assert_eq!(resolved.id, 1);
    }

    #[test]
    fn test_equal_level_prefers_shorter_range() {
        let seasons = vec![
            season(1, 2, date(2026, 6, 1), date(2026, 9, 30)),
            // Same level, much tighter range: more specific, wins
            season(2, 2, date(2026, 8, 10), date(2026, 8, 20)),
        ];
        let matcher = SeasonMatcher::new();

        let resolved = matcher
            .resolve_season(10, date(2026, 8, 15), &seasons)
            .unwrap();
        assert_eq!(resolved.id, 2);
    }

    #[test]
    fn test_full_tie_breaks_to_lowest_id() {
        let seasons = vec![
            season(5, 2, date(2026, 8, 1), date(2026, 8, 31)),
            season(3, 2, date(2026, 8, 1), date(2026, 8, 31)),
        ];
        let matcher = SeasonMatcher::new();

        let resolved = matcher
            .resolve_season(10, date(2026, 8, 15), &seasons)
            .unwrap();
        assert_eq!(resolved.id, 3);
    }

    #[test]
    fn test_out_of_season_is_reported() {
        let seasons = vec![season(1, 1, date(2026, 6, 1), date(2026, 9, 30))];
        let matcher = SeasonMatcher::new();

        let err = matcher
            .resolve_season(10, date(2026, 12, 24), &seasons)
            .unwrap_err();
        assert!(matches!(err, AppError::OutOfSeason { .. }));
    }

    #[test]
    fn test_exact_rate_match() {
        let s = season(1, 1, date(2026, 6, 1), date(2026, 9, 30));
        let rates = vec![
            rate(1, 1, BedType::Dbl, MealPlan::BedBreakfast, dec!(70.00)),
            rate(2, 1, BedType::Dbl, MealPlan::HalfBoard, dec!(85.00)),
        ];
        let matcher = SeasonMatcher::new();

        let (resolved, exact) = matcher
            .resolve_rate(&s, 7, BedType::Dbl, MealPlan::HalfBoard, &rates)
            .unwrap();
        assert_eq!(resolved.id, 2);
        assert!(exact);
    }

    #[test]
    fn test_meal_plan_fallback() {
        let s = season(1, 1, date(2026, 6, 1), date(2026, 9, 30));
        let rates = vec![rate(1, 1, BedType::Dbl, MealPlan::BedBreakfast, dec!(70.00))];
        let matcher = SeasonMatcher::new();

        // Full board not offered: falls back to bed & breakfast
        let (resolved, exact) = matcher
            .resolve_rate(&s, 7, BedType::Dbl, MealPlan::FullBoard, &rates)
            .unwrap();
        assert_eq!(resolved.id, 1);
        assert!(!exact);
    }

    #[test]
    fn test_no_rate_fails_closed() {
        let s = season(1, 1, date(2026, 6, 1), date(2026, 9, 30));
        // Only a single-room rate exists; a double must not match it
        let rates = vec![rate(1, 1, BedType::Sgl, MealPlan::BedBreakfast, dec!(55.00))];
        let matcher = SeasonMatcher::new();

        let err = matcher
            .resolve_rate(&s, 7, BedType::Dbl, MealPlan::BedBreakfast, &rates)
            .unwrap_err();
        assert!(matches!(err, AppError::RateNotFound { .. }));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let seasons = vec![
            season(1, 1, date(2026, 6, 1), date(2026, 9, 30)),
            season(2, 3, date(2026, 7, 1), date(2026, 8, 31)),
        ];
        let rates = vec![
            rate(1, 2, BedType::Dbl, MealPlan::BedBreakfast, dec!(92.00)),
            rate(2, 1, BedType::Dbl, MealPlan::BedBreakfast, dec!(70.00)),
        ];
        let matcher = SeasonMatcher::new();

        let first = matcher
            .resolve(
                10,
                date(2026, 7, 15),
                7,
                BedType::Dbl,
                MealPlan::BedBreakfast,
                &seasons,
                &rates,
            )
            .unwrap();
        let second = matcher
            .resolve(
                10,
                date(2026, 7, 15),
                7,
                BedType::Dbl,
                MealPlan::BedBreakfast,
                &seasons,
                &rates,
            )
            .unwrap();

        assert_eq!(first.season.id, second.season.id);
        assert_eq!(first.rate.id, second.rate.id);
        assert_eq!(first.exact_meal_plan, second.exact_meal_plan);
    }
}
