//! Staffing/pricing ratio rules
//!
//! Translates the UI-level rule (per person, per room, per vehicle,
//! per group) into the backend's ratio fields. Pure translation, no
//! computation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// UI-level pricing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioRule {
    PerPerson,
    PerRoom,
    PerVehicle,
    PerGroup,
}

impl RatioRule {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per_person" => Some(RatioRule::PerPerson),
            "per_room" => Some(RatioRule::PerRoom),
            "per_vehicle" => Some(RatioRule::PerVehicle),
            "per_group" => Some(RatioRule::PerGroup),
            _ => None,
        }
    }
}

impl fmt::Display for RatioRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioRule::PerPerson => write!(f, "per_person"),
            RatioRule::PerRoom => write!(f, "per_room"),
            RatioRule::PerVehicle => write!(f, "per_vehicle"),
            RatioRule::PerGroup => write!(f, "per_group"),
        }
    }
}

/// Backend ratio type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioType {
    /// Scales with the counted units (persons, rooms, vehicles)
    Ratio,
    /// Fixed charge, independent of unit counts
    Set,
}

/// Backend ratio fields derived from a UI rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSpec {
    pub ratio_type: RatioType,
    pub ratio_per: u32,
    pub ratio_categories: String,
}

/// Default category set when the rule does not name one
const DEFAULT_CATEGORIES: &str = "adult";

impl RatioSpec {
    /// Map a UI rule to backend ratio fields
    ///
    /// Total over its domain: unknown/absent rules fall back to a fixed
    /// group-level charge. `PerGroup` always yields a divisor of 1 and
    /// ignores `ratio_per`.
    pub fn from_rule(
        rule: Option<RatioRule>,
        ratio_per: Option<u32>,
        ratio_categories: Option<&str>,
    ) -> Self {
        let per = ratio_per.unwrap_or(1);
        let categories = ratio_categories.unwrap_or(DEFAULT_CATEGORIES);

        match rule {
            Some(RatioRule::PerPerson) => Self {
                ratio_type: RatioType::Ratio,
                ratio_per: per,
                ratio_categories: categories.to_string(),
            },
            Some(RatioRule::PerRoom) => Self {
                ratio_type: RatioType::Ratio,
                ratio_per: per,
                ratio_categories: "room".to_string(),
            },
            Some(RatioRule::PerVehicle) => Self {
                ratio_type: RatioType::Ratio,
                ratio_per: per,
                ratio_categories: "vehicle".to_string(),
            },
            Some(RatioRule::PerGroup) => Self {
                ratio_type: RatioType::Set,
                ratio_per: 1,
                ratio_categories: categories.to_string(),
            },
            None => Self {
                ratio_type: RatioType::Set,
                ratio_per: 1,
                ratio_categories: DEFAULT_CATEGORIES.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_person_maps_to_ratio() {
        let spec = RatioSpec::from_rule(Some(RatioRule::PerPerson), Some(4), Some("adult,teen"));
        assert_eq!(spec.ratio_type, RatioType::Ratio);
        assert_eq!(spec.ratio_per, 4);
        assert_eq!(spec.ratio_categories, "adult,teen");
    }

    #[test]
    fn test_per_person_defaults() {
        let spec = RatioSpec::from_rule(Some(RatioRule::PerPerson), None, None);
        assert_eq!(spec.ratio_type, RatioType::Ratio);
        assert_eq!(spec.ratio_per, 1);
        assert_eq!(spec.ratio_categories, "adult");
    }

    #[test]
    fn test_per_room_and_per_vehicle() {
        let spec = RatioSpec::from_rule(Some(RatioRule::PerRoom), Some(2), Some("ignored"));
        assert_eq!(spec.ratio_type, RatioType::Ratio);
        assert_eq!(spec.ratio_per, 2);
        assert_eq!(spec.ratio_categories, "room");

        let spec = RatioSpec::from_rule(Some(RatioRule::PerVehicle), None, None);
        assert_eq!(spec.ratio_per, 1);
        assert_eq!(spec.ratio_categories, "vehicle");
    }

    #[test]
    fn test_per_group_ignores_ratio_per() {
        // A fixed group-level charge: divisor always 1
        let spec = RatioSpec::from_rule(Some(RatioRule::PerGroup), Some(12), Some("adult"));
        assert_eq!(spec.ratio_type, RatioType::Set);
        assert_eq!(spec.ratio_per, 1);
        assert_eq!(spec.ratio_categories, "adult");
    }

    #[test]
    fn test_unknown_rule_defaults_to_set() {
        let spec = RatioSpec::from_rule(None, None, None);
        assert_eq!(spec.ratio_type, RatioType::Set);
        assert_eq!(spec.ratio_per, 1);
        assert_eq!(spec.ratio_categories, "adult");
    }
}
