use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// What the user is working toward; drives the calorie offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "goal_kind", rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    GainWeight,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "gender_kind", rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "activity_kind", rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub goal: Goal,
    pub age: i32,
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub height_cm: f64,
    pub allergies: Option<sqlx::types::Json<Vec<String>>>,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Allergy list as a plain slice; absent column means no allergies.
    pub fn allergy_list(&self) -> &[String] {
        self.allergies.as_ref().map_or(&[], |j| j.0.as_slice())
    }
}
