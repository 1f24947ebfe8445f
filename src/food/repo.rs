use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::external::nutrition::ExternalFood;
use crate::food::dto::CreateFoodRequest;

/// Catalog row. Macros are per single serving.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub serving_size: f64,
    pub serving_unit: String,
    pub barcode: Option<String>,
    pub fdc_id: Option<i64>,
    pub created_at: OffsetDateTime,
}

const FOOD_COLUMNS: &str = "id, name, calories, protein_g, carbs_g, fat_g, serving_size, \
     serving_unit, barcode, fdc_id, created_at";

pub async fn search(db: &PgPool, query: &str, limit: i64) -> anyhow::Result<Vec<FoodItem>> {
    let sql = format!(
        "SELECT {FOOD_COLUMNS} FROM food_items WHERE name ILIKE $1 ORDER BY name LIMIT $2"
    );
    let rows = sqlx::query_as::<_, FoodItem>(&sql)
        .bind(format!("%{}%", query))
        .bind(limit)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<FoodItem>> {
    let sql = format!("SELECT {FOOD_COLUMNS} FROM food_items WHERE id = $1");
    let row = sqlx::query_as::<_, FoodItem>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn find_by_barcode(db: &PgPool, barcode: &str) -> anyhow::Result<Option<FoodItem>> {
    let sql = format!("SELECT {FOOD_COLUMNS} FROM food_items WHERE barcode = $1");
    let row = sqlx::query_as::<_, FoodItem>(&sql)
        .bind(barcode)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn insert_custom(db: &PgPool, food: &CreateFoodRequest) -> anyhow::Result<FoodItem> {
    let sql = format!(
        "INSERT INTO food_items (name, calories, protein_g, carbs_g, fat_g, serving_size, serving_unit) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {FOOD_COLUMNS}"
    );
    let row = sqlx::query_as::<_, FoodItem>(&sql)
        .bind(&food.name)
        .bind(food.calories)
        .bind(food.protein_g)
        .bind(food.carbs_g)
        .bind(food.fat_g)
        .bind(food.serving_size)
        .bind(&food.serving_unit)
        .fetch_one(db)
        .await?;
    Ok(row)
}

/// Cache-fill insert keyed by barcode. `ON CONFLICT DO NOTHING` makes two
/// simultaneous misses converge on one row; the loser gets `None` and
/// re-reads.
pub async fn insert_from_external(
    db: &PgPool,
    barcode: &str,
    food: &ExternalFood,
) -> anyhow::Result<Option<FoodItem>> {
    let sql = format!(
        "INSERT INTO food_items (name, calories, protein_g, carbs_g, fat_g, serving_size, \
         serving_unit, barcode, fdc_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         ON CONFLICT (barcode) DO NOTHING RETURNING {FOOD_COLUMNS}"
    );
    let row = sqlx::query_as::<_, FoodItem>(&sql)
        .bind(&food.name)
        .bind(food.calories)
        .bind(food.protein_g)
        .bind(food.carbs_g)
        .bind(food.fat_g)
        .bind(food.serving_size)
        .bind(&food.serving_unit)
        .bind(barcode)
        .bind(food.fdc_id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}
