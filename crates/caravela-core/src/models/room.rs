//! Room demand and bed type models
//!
//! Room demand is the list of (bed type, quantity) allocations attached to
//! a formula or service. It is edited locally and sent as part of pricing
//! and booking requests; it has no persistence of its own in this layer.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bed type codes as used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BedType {
    /// Single
    Sgl,
    /// Double
    Dbl,
    /// Twin
    Twn,
    /// Triple
    Tpl,
    /// Family room
    Fam,
    /// Extra bed
    Exb,
    /// Child cot
    Cnt,
}

impl BedType {
    /// All bed types, in display order
    pub const ALL: [BedType; 7] = [
        BedType::Sgl,
        BedType::Dbl,
        BedType::Twn,
        BedType::Tpl,
        BedType::Fam,
        BedType::Exb,
        BedType::Cnt,
    ];

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SGL" => Some(BedType::Sgl),
            "DBL" => Some(BedType::Dbl),
            "TWN" => Some(BedType::Twn),
            "TPL" => Some(BedType::Tpl),
            "FAM" => Some(BedType::Fam),
            "EXB" => Some(BedType::Exb),
            "CNT" => Some(BedType::Cnt),
            _ => None,
        }
    }
}

impl fmt::Display for BedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedType::Sgl => write!(f, "SGL"),
            BedType::Dbl => write!(f, "DBL"),
            BedType::Twn => write!(f, "TWN"),
            BedType::Tpl => write!(f, "TPL"),
            BedType::Fam => write!(f, "FAM"),
            BedType::Exb => write!(f, "EXB"),
            BedType::Cnt => write!(f, "CNT"),
        }
    }
}

/// Meal plan attached to a room rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MealPlan {
    RoomOnly,
    /// Default fallback when a requested meal plan has no rate
    #[default]
    BedBreakfast,
    HalfBoard,
    FullBoard,
    AllInclusive,
}

impl MealPlan {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "room_only" => Some(MealPlan::RoomOnly),
            "bed_breakfast" => Some(MealPlan::BedBreakfast),
            "half_board" => Some(MealPlan::HalfBoard),
            "full_board" => Some(MealPlan::FullBoard),
            "all_inclusive" => Some(MealPlan::AllInclusive),
            _ => None,
        }
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealPlan::RoomOnly => write!(f, "room_only"),
            MealPlan::BedBreakfast => write!(f, "bed_breakfast"),
            MealPlan::HalfBoard => write!(f, "half_board"),
            MealPlan::FullBoard => write!(f, "full_board"),
            MealPlan::AllInclusive => write!(f, "all_inclusive"),
        }
    }
}

/// One (bed type, quantity) allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDemandEntry {
    pub bed_type: BedType,
    /// Always >= 1; removal is an explicit separate action
    pub qty: u32,
}

/// A room demand entry flagged against an availability constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlaggedRoomDemandEntry {
    pub bed_type: BedType,
    pub qty: u32,
    /// False when the entry's bed type is not offered by the current
    /// room category; the entry is kept to preserve user intent
    pub available: bool,
}

/// Ordered room demand list, unique by bed type
///
/// Invariants (hold after any operation sequence, and are re-checked on
/// deserialization):
/// - no two entries share a bed type
/// - every quantity is >= 1
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoomDemand {
    entries: Vec<RoomDemandEntry>,
}

impl<'de> Deserialize<'de> for RoomDemand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<RoomDemandEntry>::deserialize(deserializer)?;
        RoomDemand::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

impl RoomDemand {
    /// Create an empty demand list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw entries, enforcing the invariants
    pub fn from_entries(entries: Vec<RoomDemandEntry>) -> Result<Self, AppError> {
        let mut demand = Self::new();
        for entry in entries {
            if entry.qty < 1 {
                return Err(AppError::Validation(format!(
                    "room demand quantity for {} must be at least 1",
                    entry.bed_type
                )));
            }
            if demand.contains(entry.bed_type) {
                return Err(AppError::Conflict(format!(
                    "duplicate room demand entry for bed type {}",
                    entry.bed_type
                )));
            }
            demand.entries.push(entry);
        }
        Ok(demand)
    }

    /// Whether an entry exists for the bed type
    pub fn contains(&self, bed_type: BedType) -> bool {
        self.entries.iter().any(|e| e.bed_type == bed_type)
    }

    /// Quantity for a bed type (0 when absent)
    pub fn qty(&self, bed_type: BedType) -> u32 {
        self.entries
            .iter()
            .find(|e| e.bed_type == bed_type)
            .map(|e| e.qty)
            .unwrap_or(0)
    }

    /// Bed types that may still be added: all bed types minus those in use
    pub fn addable(&self) -> Vec<BedType> {
        BedType::ALL
            .iter()
            .copied()
            .filter(|bt| !self.contains(*bt))
            .collect()
    }

    /// Addable bed types further constrained by an availability list
    pub fn addable_within(&self, available: &[BedType]) -> Vec<BedType> {
        self.addable()
            .into_iter()
            .filter(|bt| available.contains(bt))
            .collect()
    }

    /// Add an entry for a bed type not yet present, starting at quantity 1
    pub fn add(&mut self, bed_type: BedType) -> Result<(), AppError> {
        if self.contains(bed_type) {
            return Err(AppError::Conflict(format!(
                "bed type {} is already in the room demand",
                bed_type
            )));
        }
        self.entries.push(RoomDemandEntry { bed_type, qty: 1 });
        Ok(())
    }

    /// Increment the quantity for a bed type
    pub fn increment(&mut self, bed_type: BedType) -> Result<(), AppError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.bed_type == bed_type)
            .ok_or_else(|| {
                AppError::NotFound(format!("no room demand entry for bed type {}", bed_type))
            })?;
        entry.qty += 1;
        Ok(())
    }

    /// Decrement the quantity for a bed type, flooring at 1
    ///
    /// Decrementing from 1 is a no-op; it never removes the entry.
    pub fn decrement(&mut self, bed_type: BedType) -> Result<(), AppError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.bed_type == bed_type)
            .ok_or_else(|| {
                AppError::NotFound(format!("no room demand entry for bed type {}", bed_type))
            })?;
        if entry.qty > 1 {
            entry.qty -= 1;
        }
        Ok(())
    }

    /// Remove the entry for a bed type entirely
    pub fn remove(&mut self, bed_type: BedType) -> Result<(), AppError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.bed_type != bed_type);
        if self.entries.len() == before {
            return Err(AppError::NotFound(format!(
                "no room demand entry for bed type {}",
                bed_type
            )));
        }
        Ok(())
    }

    /// Flag entries against an optional availability constraint
    ///
    /// Entries whose bed type is absent from `available` are marked
    /// unavailable instead of being dropped.
    pub fn flag_against(&self, available: Option<&[BedType]>) -> Vec<FlaggedRoomDemandEntry> {
        self.entries
            .iter()
            .map(|e| FlaggedRoomDemandEntry {
                bed_type: e.bed_type,
                qty: e.qty,
                available: available.map_or(true, |a| a.contains(&e.bed_type)),
            })
            .collect()
    }

    /// Total number of rooms demanded
    pub fn total_rooms(&self) -> u32 {
        self.entries.iter().map(|e| e.qty).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[RoomDemandEntry] {
        &self.entries
    }
}
