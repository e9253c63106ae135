//! Room demand DTOs

use caravela_core::models::{BedType, FlaggedRoomDemandEntry, RoomDemand, RoomDemandEntry};
use caravela_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A single room demand operation
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RoomDemandOp {
    Add { bed_type: BedType },
    Increment { bed_type: BedType },
    Decrement { bed_type: BedType },
    Remove { bed_type: BedType },
}

/// Apply a sequence of operations to a room demand list
#[derive(Debug, Clone, Deserialize)]
pub struct RoomDemandApplyRequest {
    /// Starting state (re-validated on deserialization)
    #[serde(default)]
    pub entries: RoomDemand,
    pub ops: Vec<RoomDemandOp>,
    /// Optional availability constraint from the selected room category
    #[serde(default)]
    pub available: Option<Vec<BedType>>,
}

impl RoomDemandApplyRequest {
    /// Run the operations, returning the resulting list
    pub fn apply(self) -> AppResult<(RoomDemand, Option<Vec<BedType>>)> {
        let mut demand = self.entries;
        for op in &self.ops {
            match *op {
                RoomDemandOp::Add { bed_type } => {
                    if let Some(available) = &self.available {
                        if !available.contains(&bed_type) {
                            return Err(AppError::Validation(format!(
                                "bed type {} is not available for this room category",
                                bed_type
                            )));
                        }
                    }
                    demand.add(bed_type)?;
                }
                RoomDemandOp::Increment { bed_type } => demand.increment(bed_type)?,
                RoomDemandOp::Decrement { bed_type } => demand.decrement(bed_type)?,
                RoomDemandOp::Remove { bed_type } => demand.remove(bed_type)?,
            }
        }
        Ok((demand, self.available))
    }
}

/// Result of applying room demand operations
#[derive(Debug, Clone, Serialize)]
pub struct RoomDemandApplyResponse {
    pub entries: Vec<RoomDemandEntry>,
    /// Bed types that may still be added (set difference, optionally
    /// constrained by availability)
    pub addable: Vec<BedType>,
    /// Entries flagged against the availability constraint; unavailable
    /// ones are kept, not dropped
    pub flagged: Vec<FlaggedRoomDemandEntry>,
}

impl RoomDemandApplyResponse {
    pub fn from_demand(demand: &RoomDemand, available: Option<&[BedType]>) -> Self {
        Self {
            entries: demand.entries().to_vec(),
            addable: match available {
                Some(avail) => demand.addable_within(avail),
                None => demand.addable(),
            },
            flagged: demand.flag_against(available),
        }
    }
}
