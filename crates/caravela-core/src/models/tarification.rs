//! Tarification entry and compute result models
//!
//! Each pricing mode owns a distinct entry shape; the active mode's
//! entries are the only durable pricing state. Computed results are
//! derived on demand and must be recomputable byte-for-byte from the
//! same inputs.

use super::pax::{PaxCategory, PaxComposition, TripDates};
use super::ratio::{RatioRule, RatioSpec};
use super::room::RoomDemand;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Pricing mode of a cotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TarificationMode {
    RangeWeb,
    PerPerson,
    PerGroup,
    ServiceList,
    Enumeration,
}

impl fmt::Display for TarificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TarificationMode::RangeWeb => write!(f, "range_web"),
            TarificationMode::PerPerson => write!(f, "per_person"),
            TarificationMode::PerGroup => write!(f, "per_group"),
            TarificationMode::ServiceList => write!(f, "service_list"),
            TarificationMode::Enumeration => write!(f, "enumeration"),
        }
    }
}

/// One row of a range-web price table: a per-pax price valid for an
/// inclusive group-size bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeWebEntry {
    pub label: String,
    pub min_pax: u32,
    pub max_pax: u32,
    pub price_per_pax: Decimal,
}

impl RangeWebEntry {
    /// Whether the bracket covers the group size
    pub fn covers(&self, pax: u32) -> bool {
        pax >= self.min_pax && pax <= self.max_pax
    }
}

/// Per-person price for one passenger category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPersonEntry {
    pub label: String,
    pub category: PaxCategory,
    pub price: Decimal,
}

/// Fixed group-level amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerGroupEntry {
    pub label: String,
    pub price: Decimal,
}

/// A service line with an optional staffing/pricing ratio rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceListEntry {
    pub label: String,
    /// Day of the itinerary the service belongs to (1-based)
    #[serde(default)]
    pub day: Option<u32>,
    pub unit_price: Decimal,
    #[serde(default)]
    pub rule: Option<RatioRule>,
    #[serde(default)]
    pub ratio_per: Option<u32>,
    #[serde(default)]
    pub ratio_categories: Option<String>,
}

impl ServiceListEntry {
    /// Backend ratio fields for this service
    pub fn ratio_spec(&self) -> RatioSpec {
        RatioSpec::from_rule(self.rule, self.ratio_per, self.ratio_categories.as_deref())
    }
}

/// Explicitly enumerated amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationEntry {
    pub label: String,
    pub amount: Decimal,
}

/// The active mode's entries, as a tagged union
///
/// Exactly one variant exists per cotation at compute time. Switching
/// modes replaces the variant wholesale; entry data from the previous
/// mode is intentionally discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "entries", rename_all = "snake_case")]
pub enum TarificationEntries {
    RangeWeb(Vec<RangeWebEntry>),
    PerPerson(Vec<PerPersonEntry>),
    PerGroup(Vec<PerGroupEntry>),
    ServiceList(Vec<ServiceListEntry>),
    Enumeration(Vec<EnumerationEntry>),
}

impl TarificationEntries {
    /// The mode this entry set belongs to
    pub fn mode(&self) -> TarificationMode {
        match self {
            TarificationEntries::RangeWeb(_) => TarificationMode::RangeWeb,
            TarificationEntries::PerPerson(_) => TarificationMode::PerPerson,
            TarificationEntries::PerGroup(_) => TarificationMode::PerGroup,
            TarificationEntries::ServiceList(_) => TarificationMode::ServiceList,
            TarificationEntries::Enumeration(_) => TarificationMode::Enumeration,
        }
    }

    /// Empty entry set for a mode (used when switching modes)
    pub fn empty_for(mode: TarificationMode) -> Self {
        match mode {
            TarificationMode::RangeWeb => TarificationEntries::RangeWeb(Vec::new()),
            TarificationMode::PerPerson => TarificationEntries::PerPerson(Vec::new()),
            TarificationMode::PerGroup => TarificationEntries::PerGroup(Vec::new()),
            TarificationMode::ServiceList => TarificationEntries::ServiceList(Vec::new()),
            TarificationMode::Enumeration => TarificationEntries::Enumeration(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TarificationEntries::RangeWeb(v) => v.len(),
            TarificationEntries::PerPerson(v) => v.len(),
            TarificationEntries::PerGroup(v) => v.len(),
            TarificationEntries::ServiceList(v) => v.len(),
            TarificationEntries::Enumeration(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the engine needs to price a cotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeRequest {
    pub cotation_id: Uuid,
    pub entries: TarificationEntries,
    pub room_demand: RoomDemand,
    pub pax: PaxComposition,
    pub trip: TripDates,
}

/// One computed line (per service, day, or pax category)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TarificationComputedLine {
    /// Stable position within the result, assigned sequentially
    pub position: u32,
    pub label: String,
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub category: Option<PaxCategory>,
    pub unit_price: Decimal,
    pub quantity: Decimal,
    pub amount: Decimal,
}

/// Per-category pricing summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CotationPaxResult {
    pub category: PaxCategory,
    pub pax_count: u32,
    pub per_pax: Decimal,
    pub total: Decimal,
}

/// Kind of supplement applied on top of computed lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementKind {
    SingleRoom,
    EarlyBird,
    Custom,
}

/// A supplement or discount (negative amount) applied to the cotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CotationSupplement {
    pub label: String,
    pub kind: SupplementKind,
    pub amount: Decimal,
}

/// Full compute output: ordered lines, per-category summaries,
/// supplements, and the exact grand total
///
/// Never persisted; only the source entries are durable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TarificationComputeResult {
    pub lines: Vec<TarificationComputedLine>,
    pub pax_results: Vec<CotationPaxResult>,
    pub supplements: Vec<CotationSupplement>,
    pub grand_total: Decimal,
    pub currency: String,
}

impl TarificationComputeResult {
    /// Exact sum of line amounts plus supplement amounts
    ///
    /// Must always equal `grand_total`; exposed so callers and tests can
    /// re-verify without recomputing.
    pub fn summed_total(&self) -> Decimal {
        let lines: Decimal = self.lines.iter().map(|l| l.amount).sum();
        let supplements: Decimal = self.supplements.iter().map(|s| s.amount).sum();
        lines + supplements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mode_round_trip() {
        let entries = TarificationEntries::RangeWeb(vec![RangeWebEntry {
            label: "2-5 pax".to_string(),
            min_pax: 2,
            max_pax: 5,
            price_per_pax: dec!(410.00),
        }]);
        assert_eq!(entries.mode(), TarificationMode::RangeWeb);

        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json["mode"], "range_web");

        let back: TarificationEntries = serde_json::from_value(json).unwrap();
        assert_eq!(back, entries);
    }

    #[test]
    fn test_empty_for_each_mode() {
        for mode in [
            TarificationMode::RangeWeb,
            TarificationMode::PerPerson,
            TarificationMode::PerGroup,
            TarificationMode::ServiceList,
            TarificationMode::Enumeration,
        ] {
            let entries = TarificationEntries::empty_for(mode);
            assert_eq!(entries.mode(), mode);
            assert!(entries.is_empty());
        }
    }

    #[test]
    fn test_range_covers() {
        let entry = RangeWebEntry {
            label: "4-8".to_string(),
            min_pax: 4,
            max_pax: 8,
            price_per_pax: dec!(100),
        };
        assert!(entry.covers(4));
        assert!(entry.covers(8));
        assert!(!entry.covers(3));
        assert!(!entry.covers(9));
    }

    #[test]
    fn test_summed_total_matches_parts() {
        let result = TarificationComputeResult {
            lines: vec![
                TarificationComputedLine {
                    position: 1,
                    label: "a".to_string(),
                    day: None,
                    category: Some(PaxCategory::Adult),
                    unit_price: dec!(100.10),
                    quantity: dec!(2),
                    amount: dec!(200.20),
                },
                TarificationComputedLine {
                    position: 2,
                    label: "b".to_string(),
                    day: None,
                    category: None,
                    unit_price: dec!(35.05),
                    quantity: dec!(1),
                    amount: dec!(35.05),
                },
            ],
            pax_results: vec![],
            supplements: vec![CotationSupplement {
                label: "discount".to_string(),
                kind: SupplementKind::EarlyBird,
                amount: dec!(-11.76),
            }],
            grand_total: dec!(223.49),
            currency: "EUR".to_string(),
        };
        assert_eq!(result.summed_total(), result.grand_total);
    }
}
