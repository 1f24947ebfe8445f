use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::diary::repo::{DiaryEntryRow, MealType};

/// Request body for POST /diary. `log_date` defaults to today (UTC).
#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    pub food_id: Uuid,
    pub meal_type: MealType,
    pub quantity: f64,
    #[serde(default)]
    pub log_date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct DiaryQuery {
    #[serde(default)]
    pub date: Option<Date>,
}

/// A diary entry with macros scaled by the logged quantity.
#[derive(Debug, Serialize)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub food_id: Uuid,
    pub food_name: String,
    pub meal_type: MealType,
    pub quantity: f64,
    pub serving_size: f64,
    pub serving_unit: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub created_at: OffsetDateTime,
}

impl From<DiaryEntryRow> for DiaryEntry {
    fn from(row: DiaryEntryRow) -> Self {
        Self {
            id: row.id,
            food_id: row.food_id,
            food_name: row.food_name,
            meal_type: row.meal_type,
            quantity: row.quantity,
            serving_size: row.serving_size,
            serving_unit: row.serving_unit,
            calories: row.calories * row.quantity,
            protein_g: row.protein_g * row.quantity,
            carbs_g: row.carbs_g * row.quantity,
            fat_g: row.fat_g * row.quantity,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct DayTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl DayTotals {
    pub fn accumulate(entries: &[DiaryEntry]) -> Self {
        let mut totals = Self::default();
        for e in entries {
            totals.calories += e.calories;
            totals.protein_g += e.protein_g;
            totals.carbs_g += e.carbs_g;
            totals.fat_g += e.fat_g;
        }
        totals
    }
}

#[derive(Debug, Serialize)]
pub struct DiaryDayResponse {
    pub date: Date,
    pub entries: Vec<DiaryEntry>,
    pub totals: DayTotals,
}
