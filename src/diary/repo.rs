use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "meal_kind", rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaryLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_id: Uuid,
    pub meal_type: MealType,
    pub quantity: f64,
    pub log_date: Date,
    pub created_at: OffsetDateTime,
}

/// Diary row joined with its food, as fetched for the day view.
#[derive(Debug, Clone, FromRow)]
pub struct DiaryEntryRow {
    pub id: Uuid,
    pub food_id: Uuid,
    pub meal_type: MealType,
    pub quantity: f64,
    pub log_date: Date,
    pub created_at: OffsetDateTime,
    pub food_name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub serving_size: f64,
    pub serving_unit: String,
}

/// The one-log-per-user/food/meal/day rule is a read-then-insert check.
pub async fn exists(
    db: &PgPool,
    user_id: Uuid,
    food_id: Uuid,
    meal_type: MealType,
    log_date: Date,
) -> anyhow::Result<bool> {
    let found: Option<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT id FROM diary_logs
        WHERE user_id = $1 AND food_id = $2 AND meal_type = $3 AND log_date = $4
        "#,
    )
    .bind(user_id)
    .bind(food_id)
    .bind(meal_type)
    .bind(log_date)
    .fetch_optional(db)
    .await?;
    Ok(found.is_some())
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    food_id: Uuid,
    meal_type: MealType,
    quantity: f64,
    log_date: Date,
) -> anyhow::Result<DiaryLog> {
    let row = sqlx::query_as::<_, DiaryLog>(
        r#"
        INSERT INTO diary_logs (user_id, food_id, meal_type, quantity, log_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, food_id, meal_type, quantity, log_date, created_at
        "#,
    )
    .bind(user_id)
    .bind(food_id)
    .bind(meal_type)
    .bind(quantity)
    .bind(log_date)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_for_day(
    db: &PgPool,
    user_id: Uuid,
    log_date: Date,
) -> anyhow::Result<Vec<DiaryEntryRow>> {
    let rows = sqlx::query_as::<_, DiaryEntryRow>(
        r#"
        SELECT d.id, d.food_id, d.meal_type, d.quantity, d.log_date, d.created_at,
               f.name AS food_name, f.calories, f.protein_g, f.carbs_g, f.fat_g,
               f.serving_size, f.serving_unit
        FROM diary_logs d
        JOIN food_items f ON f.id = d.food_id
        WHERE d.user_id = $1 AND d.log_date = $2
        ORDER BY d.created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(log_date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
