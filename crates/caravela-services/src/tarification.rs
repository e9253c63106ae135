//! Tarification computation
//!
//! Turns the active mode's entries, room demand, pax composition, and
//! trip dates into an ordered list of computed lines, per-category
//! summaries, supplements, and an exact grand total. All monetary
//! arithmetic is `Decimal`; amounts are rounded to cents at line level
//! only, so repeated summation cannot drift.

use caravela_core::{
    config::PricingConfig,
    models::{
        BedType, ComputeRequest, CotationPaxResult, CotationSupplement, PaxCategory, RatioType,
        SupplementKind, TarificationComputeResult, TarificationComputedLine, TarificationEntries,
    },
    AppError, AppResult,
};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, instrument};

/// Paying pax categories, in pricing order (infants travel free)
const PAYING_CATEGORIES: [PaxCategory; 3] =
    [PaxCategory::Adult, PaxCategory::Teen, PaxCategory::Child];

/// Round a monetary amount to cents
fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Ceiling division for unit counts
fn ceil_units(count: u32, per: u32) -> u32 {
    let per = per.max(1);
    (count + per - 1) / per
}

/// The pricing engine
///
/// Pure and deterministic: identical requests yield line-for-line
/// identical results. Supplements (single-room, early booking) come from
/// configuration; zero values disable them.
#[derive(Debug, Clone)]
pub struct TarificationEngine {
    currency: String,
    single_room_supplement_per_night: Decimal,
    early_bird_min_days: u32,
    early_bird_discount_percent: Decimal,
}

impl TarificationEngine {
    pub fn new(pricing: &PricingConfig) -> Self {
        Self {
            currency: pricing.currency.clone(),
            single_room_supplement_per_night: pricing.single_room_supplement_per_night,
            early_bird_min_days: pricing.early_bird_min_days,
            early_bird_discount_percent: pricing.early_bird_discount_percent,
        }
    }

    /// Compute the full pricing result for a request
    #[instrument(skip(self, request), fields(cotation_id = %request.cotation_id, mode = %request.entries.mode()))]
    pub fn compute(&self, request: &ComputeRequest) -> AppResult<TarificationComputeResult> {
        request.trip.validate()?;

        if request.entries.is_empty() {
            return Err(AppError::Validation(
                "cotation has no tarification entries".to_string(),
            ));
        }

        let mut lines = self.build_lines(request)?;
        for (idx, line) in lines.iter_mut().enumerate() {
            line.position = (idx + 1) as u32;
        }

        let lines_total: Decimal = lines.iter().map(|l| l.amount).sum();
        let supplements = self.build_supplements(request, lines_total);
        let supplements_total: Decimal = supplements.iter().map(|s| s.amount).sum();

        let pax_results = Self::build_pax_results(request, &lines);
        let grand_total = lines_total + supplements_total;

        debug!(
            lines = lines.len(),
            supplements = supplements.len(),
            %grand_total,
            "tarification computed"
        );

        Ok(TarificationComputeResult {
            lines,
            pax_results,
            supplements,
            grand_total,
            currency: self.currency.clone(),
        })
    }

    fn build_lines(&self, request: &ComputeRequest) -> AppResult<Vec<TarificationComputedLine>> {
        let pax = &request.pax;
        let mut lines = Vec::new();

        match &request.entries {
            TarificationEntries::RangeWeb(rows) => {
                let paying = pax.paying();
                if paying == 0 {
                    return Err(AppError::Validation(
                        "range pricing needs at least one paying passenger".to_string(),
                    ));
                }
                let row = rows
                    .iter()
                    .find(|r| r.covers(paying))
                    .ok_or(AppError::NoApplicableRange { pax: paying })?;

                for category in PAYING_CATEGORIES {
                    let count = pax.paying_count(category);
                    if count == 0 {
                        continue;
                    }
                    lines.push(TarificationComputedLine {
                        position: 0,
                        label: row.label.clone(),
                        day: None,
                        category: Some(category),
                        unit_price: row.price_per_pax,
                        quantity: Decimal::from(count),
                        amount: round_cents(row.price_per_pax * Decimal::from(count)),
                    });
                }
            }

            TarificationEntries::PerPerson(entries) => {
                if pax.paying() == 0 {
                    return Err(AppError::Validation(
                        "per-person pricing needs at least one paying passenger".to_string(),
                    ));
                }
                for entry in entries {
                    let count = pax.paying_count(entry.category);
                    if count == 0 {
                        continue;
                    }
                    lines.push(TarificationComputedLine {
                        position: 0,
                        label: entry.label.clone(),
                        day: None,
                        category: Some(entry.category),
                        unit_price: entry.price,
                        quantity: Decimal::from(count),
                        amount: round_cents(entry.price * Decimal::from(count)),
                    });
                }
            }

            TarificationEntries::PerGroup(entries) => {
                for entry in entries {
                    lines.push(TarificationComputedLine {
                        position: 0,
                        label: entry.label.clone(),
                        day: None,
                        category: None,
                        unit_price: entry.price,
                        quantity: Decimal::ONE,
                        amount: round_cents(entry.price),
                    });
                }
            }

            TarificationEntries::ServiceList(entries) => {
                for entry in entries {
                    let spec = entry.ratio_spec();
                    let units = match spec.ratio_type {
                        RatioType::Set => 1,
                        RatioType::Ratio => match spec.ratio_categories.as_str() {
                            "room" => ceil_units(request.room_demand.total_rooms(), spec.ratio_per),
                            "vehicle" => ceil_units(pax.paying(), spec.ratio_per),
                            categories => {
                                let count: u32 = categories
                                    .split(',')
                                    .filter_map(|token| PaxCategory::from_str(token.trim()))
                                    .map(|c| pax.paying_count(c))
                                    .sum();
                                ceil_units(count, spec.ratio_per)
                            }
                        },
                    };
                    if units == 0 {
                        continue;
                    }
                    lines.push(TarificationComputedLine {
                        position: 0,
                        label: entry.label.clone(),
                        day: entry.day,
                        category: None,
                        unit_price: entry.unit_price,
                        quantity: Decimal::from(units),
                        amount: round_cents(entry.unit_price * Decimal::from(units)),
                    });
                }
            }

            TarificationEntries::Enumeration(entries) => {
                for entry in entries {
                    lines.push(TarificationComputedLine {
                        position: 0,
                        label: entry.label.clone(),
                        day: None,
                        category: None,
                        unit_price: entry.amount,
                        quantity: Decimal::ONE,
                        amount: round_cents(entry.amount),
                    });
                }
            }
        }

        Ok(lines)
    }

    fn build_supplements(
        &self,
        request: &ComputeRequest,
        lines_total: Decimal,
    ) -> Vec<CotationSupplement> {
        let mut supplements = Vec::new();

        let single_rooms = request.room_demand.qty(BedType::Sgl);
        let nights = request.trip.nights();
        if single_rooms > 0 && nights > 0 && self.single_room_supplement_per_night > Decimal::ZERO {
            let amount = round_cents(
                self.single_room_supplement_per_night
                    * Decimal::from(single_rooms)
                    * Decimal::from(nights),
            );
            supplements.push(CotationSupplement {
                label: format!("Single room supplement ({} room(s))", single_rooms),
                kind: SupplementKind::SingleRoom,
                amount,
            });
        }

        if self.early_bird_discount_percent > Decimal::ZERO && lines_total > Decimal::ZERO {
            if let Some(days) = request.trip.days_before_departure() {
                if days >= i64::from(self.early_bird_min_days) {
                    let amount = round_cents(
                        lines_total * self.early_bird_discount_percent / Decimal::ONE_HUNDRED,
                    );
                    supplements.push(CotationSupplement {
                        label: format!(
                            "Early booking discount ({}% at {} days)",
                            self.early_bird_discount_percent, days
                        ),
                        kind: SupplementKind::EarlyBird,
                        amount: -amount,
                    });
                }
            }
        }

        supplements
    }

    /// Per-category summaries over category-attributed lines
    ///
    /// Group-level lines (no category) are not apportioned; `total` stays
    /// the exact line sum, `per_pax` is a display value rounded to cents.
    fn build_pax_results(
        request: &ComputeRequest,
        lines: &[TarificationComputedLine],
    ) -> Vec<CotationPaxResult> {
        let mut results = Vec::new();

        for category in PAYING_CATEGORIES {
            let count = request.pax.paying_count(category);
            if count == 0 {
                continue;
            }
            let category_lines: Vec<&TarificationComputedLine> = lines
                .iter()
                .filter(|l| l.category == Some(category))
                .collect();
            if category_lines.is_empty() {
                continue;
            }
            let total: Decimal = category_lines.iter().map(|l| l.amount).sum();
            results.push(CotationPaxResult {
                category,
                pax_count: count,
                per_pax: round_cents(total / Decimal::from(count)),
                total,
            });
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caravela_core::models::{
        EnumerationEntry, PaxComposition, PerGroupEntry, PerPersonEntry, RangeWebEntry, RatioRule,
        RoomDemand, RoomDemandEntry, ServiceListEntry, TripDates,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine() -> TarificationEngine {
        TarificationEngine::new(&PricingConfig::default())
    }

    fn engine_with_supplements() -> TarificationEngine {
        let mut pricing = PricingConfig::default();
        pricing.single_room_supplement_per_night = dec!(18.00);
        pricing.early_bird_min_days = 30;
        pricing.early_bird_discount_percent = dec!(5);
        TarificationEngine::new(&pricing)
    }

    fn trip() -> TripDates {
        TripDates {
            departure: date(2026, 9, 10),
            return_date: date(2026, 9, 17),
            booking_date: Some(date(2026, 6, 1)),
        }
    }

    fn request(entries: TarificationEntries, pax: PaxComposition) -> ComputeRequest {
        ComputeRequest {
            cotation_id: Uuid::new_v4(),
            entries,
            room_demand: RoomDemand::new(),
            pax,
            trip: trip(),
        }
    }

    #[test]
    fn test_per_person_compute() {
        let entries = TarificationEntries::PerPerson(vec![
            PerPersonEntry {
                label: "Circuit adult".to_string(),
                category: PaxCategory::Adult,
                price: dec!(100.00),
            },
            PerPersonEntry {
                label: "Circuit child".to_string(),
                category: PaxCategory::Child,
                price: dec!(50.00),
            },
        ]);
        let pax = PaxComposition {
            adults: 2,
            children: 1,
            ..Default::default()
        };

        let result = engine().compute(&request(entries, pax)).unwrap();

        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].amount, dec!(200.00));
        assert_eq!(result.lines[1].amount, dec!(50.00));
        assert_eq!(result.grand_total, dec!(250.00));

        let adult = result
            .pax_results
            .iter()
            .find(|r| r.category == PaxCategory::Adult)
            .unwrap();
        assert_eq!(adult.pax_count, 2);
        assert_eq!(adult.per_pax, dec!(100.00));
        assert_eq!(adult.total, dec!(200.00));
    }

    #[test]
    fn test_range_web_selects_covering_bracket() {
        let entries = TarificationEntries::RangeWeb(vec![
            RangeWebEntry {
                label: "1-3 pax".to_string(),
                min_pax: 1,
                max_pax: 3,
                price_per_pax: dec!(500.00),
            },
            RangeWebEntry {
                label: "4-8 pax".to_string(),
                min_pax: 4,
                max_pax: 8,
                price_per_pax: dec!(410.00),
            },
        ]);
        let pax = PaxComposition {
            adults: 2,
            teens: 2,
            infants: 1,
            ..Default::default()
        };

        let result = engine().compute(&request(entries, pax)).unwrap();

        // 4 paying pax (infant free) -> 4-8 bracket, one line per category
        assert_eq!(result.lines.len(), 2);
        assert!(result.lines.iter().all(|l| l.unit_price == dec!(410.00)));
        assert_eq!(result.grand_total, dec!(1640.00));
    }

    #[test]
    fn test_range_web_no_bracket_is_an_error() {
        let entries = TarificationEntries::RangeWeb(vec![RangeWebEntry {
            label: "2-5 pax".to_string(),
            min_pax: 2,
            max_pax: 5,
            price_per_pax: dec!(300.00),
        }]);
        let pax = PaxComposition {
            adults: 9,
            ..Default::default()
        };

        let err = engine().compute(&request(entries, pax)).unwrap_err();
        assert!(matches!(err, AppError::NoApplicableRange { pax: 9 }));
    }

    #[test]
    fn test_service_list_ratio_rules() {
        let entries = TarificationEntries::ServiceList(vec![
            // Fixed group charge
            ServiceListEntry {
                label: "Guide".to_string(),
                day: Some(1),
                unit_price: dec!(300.00),
                rule: Some(RatioRule::PerGroup),
                ratio_per: None,
                ratio_categories: None,
            },
            // One vehicle per 4 paying pax
            ServiceListEntry {
                label: "Minibus transfer".to_string(),
                day: Some(1),
                unit_price: dec!(80.00),
                rule: Some(RatioRule::PerVehicle),
                ratio_per: Some(4),
                ratio_categories: None,
            },
            // Per person, adults and teens only
            ServiceListEntry {
                label: "City tax".to_string(),
                day: Some(2),
                unit_price: dec!(2.50),
                rule: Some(RatioRule::PerPerson),
                ratio_per: Some(1),
                ratio_categories: Some("adult,teen".to_string()),
            },
            // Per room
            ServiceListEntry {
                label: "Porterage".to_string(),
                day: Some(2),
                unit_price: dec!(15.00),
                rule: Some(RatioRule::PerRoom),
                ratio_per: Some(1),
                ratio_categories: None,
            },
        ]);
        let pax = PaxComposition {
            adults: 4,
            teens: 2,
            children: 0,
            infants: 0,
        };
        let mut req = request(entries, pax);
        req.room_demand = RoomDemand::from_entries(vec![
            RoomDemandEntry {
                bed_type: BedType::Dbl,
                qty: 2,
            },
            RoomDemandEntry {
                bed_type: BedType::Sgl,
                qty: 1,
            },
        ])
        .unwrap();

        let result = engine().compute(&req).unwrap();

        // Guide: 1 x 300; transfer: ceil(6/4)=2 x 80; tax: 6 x 2.50; porterage: 3 x 15
        assert_eq!(result.lines.len(), 4);
        assert_eq!(result.lines[0].amount, dec!(300.00));
        assert_eq!(result.lines[1].quantity, dec!(2));
        assert_eq!(result.lines[1].amount, dec!(160.00));
        assert_eq!(result.lines[2].quantity, dec!(6));
        assert_eq!(result.lines[2].amount, dec!(15.00));
        assert_eq!(result.lines[3].quantity, dec!(3));
        assert_eq!(result.lines[3].amount, dec!(45.00));
        assert_eq!(result.grand_total, dec!(520.00));
    }

    #[test]
    fn test_enumeration_and_per_group_lines() {
        let entries = TarificationEntries::Enumeration(vec![
            EnumerationEntry {
                label: "Flights".to_string(),
                amount: dec!(1250.40),
            },
            EnumerationEntry {
                label: "Visa fees".to_string(),
                amount: dec!(85.00),
            },
        ]);
        let result = engine()
            .compute(&request(entries, PaxComposition::default()))
            .unwrap();
        assert_eq!(result.grand_total, dec!(1335.40));

        let entries = TarificationEntries::PerGroup(vec![PerGroupEntry {
            label: "Private boat".to_string(),
            price: dec!(900.00),
        }]);
        let result = engine()
            .compute(&request(entries, PaxComposition::default()))
            .unwrap();
        assert_eq!(result.grand_total, dec!(900.00));
        assert!(result.pax_results.is_empty());
    }

    #[test]
    fn test_supplements_and_sum_invariant() {
        let entries = TarificationEntries::PerPerson(vec![PerPersonEntry {
            label: "Base".to_string(),
            category: PaxCategory::Adult,
            price: dec!(100.00),
        }]);
        let pax = PaxComposition {
            adults: 2,
            ..Default::default()
        };
        let mut req = request(entries, pax);
        req.room_demand = RoomDemand::from_entries(vec![RoomDemandEntry {
            bed_type: BedType::Sgl,
            qty: 2,
        }])
        .unwrap();

        let result = engine_with_supplements().compute(&req).unwrap();

        // Lines: 200.00. Single room: 18 x 2 rooms x 7 nights = 252.00.
        // Early bird (101 days out): -5% of 200 = -10.00.
        assert_eq!(result.supplements.len(), 2);
        assert_eq!(result.supplements[0].amount, dec!(252.00));
        assert_eq!(result.supplements[1].amount, dec!(-10.00));
        assert_eq!(result.grand_total, dec!(442.00));
        assert_eq!(result.summed_total(), result.grand_total);
    }

    #[test]
    fn test_early_bird_requires_lead_time() {
        let entries = TarificationEntries::PerPerson(vec![PerPersonEntry {
            label: "Base".to_string(),
            category: PaxCategory::Adult,
            price: dec!(100.00),
        }]);
        let pax = PaxComposition {
            adults: 1,
            ..Default::default()
        };
        let mut req = request(entries, pax);
        // Booked 10 days before departure: below the 30-day threshold
        req.trip.booking_date = Some(date(2026, 8, 31));

        let result = engine_with_supplements().compute(&req).unwrap();
        assert!(result
            .supplements
            .iter()
            .all(|s| s.kind != SupplementKind::EarlyBird));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let entries = TarificationEntries::ServiceList(vec![ServiceListEntry {
            label: "Excursion".to_string(),
            day: Some(3),
            unit_price: dec!(47.33),
            rule: Some(RatioRule::PerPerson),
            ratio_per: Some(1),
            ratio_categories: Some("adult,teen,child".to_string()),
        }]);
        let pax = PaxComposition {
            adults: 2,
            teens: 1,
            children: 1,
            infants: 1,
        };
        let req = request(entries, pax);
        let engine = engine_with_supplements();

        let first = engine.compute(&req).unwrap();
        let second = engine.compute(&req).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_entries_rejected() {
        let entries = TarificationEntries::empty_for(caravela_core::models::TarificationMode::PerPerson);
        let pax = PaxComposition {
            adults: 1,
            ..Default::default()
        };
        let err = engine().compute(&request(entries, pax)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_repeated_summation_does_not_drift() {
        let entries = TarificationEntries::Enumeration(
            (0..50)
                .map(|i| EnumerationEntry {
                    label: format!("line {}", i),
                    amount: dec!(0.10),
                })
                .collect(),
        );
        let result = engine()
            .compute(&request(entries, PaxComposition::default()))
            .unwrap();

        assert_eq!(result.grand_total, dec!(5.00));
        for _ in 0..10 {
            assert_eq!(result.summed_total(), result.grand_total);
        }
    }
}
