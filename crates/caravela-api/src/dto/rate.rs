//! Season/rate lookup DTOs

use caravela_core::models::{BedType, MealPlan, SeasonType};
use caravela_core::{AppError, AppResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for a rate lookup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RateLookupQuery {
    pub date: NaiveDate,
    #[validate(range(min = 1, message = "room category id is required"))]
    pub room_category_id: i64,
    #[validate(length(min = 1, message = "bed type is required"))]
    pub bed_type: String,
    /// Defaults to bed & breakfast when omitted
    #[serde(default)]
    pub meal_plan: Option<String>,
}

impl RateLookupQuery {
    /// Parse the string-typed query fields
    pub fn parsed(&self) -> AppResult<(BedType, MealPlan)> {
        let bed_type = BedType::from_str(&self.bed_type)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown bed type {}", self.bed_type)))?;
        let meal_plan = match &self.meal_plan {
            Some(raw) => MealPlan::from_str(raw)
                .ok_or_else(|| AppError::InvalidInput(format!("unknown meal plan {}", raw)))?,
            None => MealPlan::default(),
        };
        Ok((bed_type, meal_plan))
    }
}

/// A resolved season + rate
#[derive(Debug, Clone, Serialize)]
pub struct RateLookupResponse {
    pub season_id: i64,
    pub season_name: String,
    pub season_type: SeasonType,
    pub bed_type: BedType,
    pub meal_plan: MealPlan,
    pub price: Decimal,
    /// False when the meal plan came from the fallback
    pub exact_meal_plan: bool,
}
